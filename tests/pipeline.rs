use catalog_report::charts::ChartRenderer;
use catalog_report::data::schema::{f64_values, str_values, DATE_ADDED, DURATION_NUM, RATING};
use catalog_report::data::{DataCleaner, LoaderError};
use catalog_report::report::load_and_clean;
use catalog_report::stats::CatalogAnalyzer;
use catalog_report::{run, ReportConfig};
use std::fs;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tempfile::TempDir;

const CATALOG: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in
s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries
s2,TV Show,Blood & Water,,\"Ama Qamata, Khosi Ngema\",South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,International TV Shows
s3,TV Show,Ganglands,Julien Leclercq,Sami Bouajila,,\"September 24, 2021\",2021,TV-MA,1 Season,Crime TV Shows
s4,Movie,Sankofa,Haile Gerima,Kofi Ghanaba,\"United States, Ghana, Burkina Faso\",\" December 24, 2020\",1993,TV-MA,125 min,Dramas
s5,Movie,The Starling,Theodore Melfi,Melissa McCarthy,United States,,2021,PG-13,104 min,Comedies
s6,Movie,Je Suis Karl,Christian Schwochow,Luna Wedler,\"Germany, Czech Republic\",\"September 23, 2021\",2021,,127 min,Dramas
s7,TV Show,Kota Factory,,Mayur More,India,\"December 1, 2019\",2021,TV-MA,2 Seasons,Teen TV Shows
s8,Movie,Sankofa,Haile Gerima,Kofi Ghanaba,\"United States, Ghana\",\"sometime\",1993,TV-MA,125 min,Dramas
s9,Movie,Grown Ups,Dennis Dugan,Adam Sandler,United States,\"December 31, 2019\",2010,PG-13,,Comedies
";

fn write_catalog(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("netflix_titles.csv");
    fs::write(&path, CATALOG).unwrap();
    path
}

#[test]
fn cleaned_catalog_satisfies_invariants() {
    let dir = TempDir::new().unwrap();
    let (df, loaded) = load_and_clean(&write_catalog(&dir)).unwrap();

    assert_eq!(loaded, 9);
    // s5 has no date, s6 no rating, s8 an unparseable date
    assert_eq!(df.height(), 6);
    assert_eq!(df.column(DATE_ADDED).unwrap().null_count(), 0);
    assert_eq!(df.column(RATING).unwrap().null_count(), 0);

    let durations = f64_values(&df, DURATION_NUM).unwrap();
    assert_eq!(
        durations,
        vec![Some(90.0), Some(2.0), Some(1.0), Some(125.0), Some(2.0), None]
    );

    let countries = str_values(&df, "country").unwrap();
    assert_eq!(countries[2].as_deref(), Some("Unknown"));
}

#[test]
fn cleaning_again_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let (df, _) = load_and_clean(&write_catalog(&dir)).unwrap();
    let again = DataCleaner::clean(df.clone()).unwrap();
    assert!(df.equals_missing(&again));
}

#[test]
fn analysis_over_loaded_catalog() {
    let dir = TempDir::new().unwrap();
    let (df, _) = load_and_clean(&write_catalog(&dir)).unwrap();
    let report = CatalogAnalyzer::analyze(&df).unwrap();

    let total: f64 = report.type_shares.iter().map(|(_, share)| share).sum();
    assert!((total - 100.0).abs() < 1e-9);

    assert_eq!(report.peak_year_added, Some(2021));
    assert_eq!(report.top_country.as_deref(), Some("United States"));
    assert_eq!(report.top_rating.as_deref(), Some("TV-MA"));
    // 90 and 125; Grown Ups has no duration
    assert_eq!(report.avg_movie_duration, Some(107.5));
    assert_eq!(report.avg_tv_seasons, Some(1.67));
    assert!(report
        .release_added_correlation
        .is_some_and(|r| (-1.0..=1.0).contains(&r)));
    assert!(report.top_directors.iter().all(|(name, _)| name != "Unknown"));
    assert_eq!(report.top_directors.len(), 3);
    assert_eq!(
        report.december_by_type,
        vec![("Movie".to_string(), 2), ("TV Show".to_string(), 1)]
    );
}

#[test]
fn missing_input_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let config = ReportConfig::default()
        .with_input_path(dir.path().join("absent.csv"))
        .with_output_dir(dir.path().join("plots"));

    let err = run(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoaderError>(),
        Some(LoaderError::NotFound(_))
    ));
    assert!(!dir.path().join("plots").exists());
}

#[test]
fn run_writes_six_charts_into_new_directory() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("nested").join("plots");
    let config = ReportConfig::default()
        .with_input_path(write_catalog(&dir))
        .with_output_dir(output_dir.clone());

    let summary = run(&config).unwrap();
    assert_eq!(summary.loaded_rows, 9);
    assert_eq!(summary.cleaned_rows, 6);
    assert_eq!(summary.charts.len(), 6);

    let distinct: BTreeSet<_> = summary.charts.iter().collect();
    assert_eq!(distinct.len(), 6);
    for name in ChartRenderer::file_names() {
        let path = output_dir.join(name);
        assert!(summary.charts.contains(&path), "{name}");
        assert!(fs::metadata(&path).unwrap().len() > 0, "{name}");
    }
}

#[test]
fn empty_catalog_still_renders_every_chart() {
    let dir = TempDir::new().unwrap();
    let (df, _) = load_and_clean(&write_catalog(&dir)).unwrap();
    let output_dir = dir.path().join("empty_plots");

    let written = ChartRenderer::render_all(&df.head(Some(0)), &output_dir).unwrap();
    assert_eq!(written.len(), 6);
    assert!(written.iter().all(|path| path.exists()));
}
