//! End-to-end selector flows over real HTTP against a local fake universities service.

mod helpers;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde_json::json;

use helpers::spawn_upstream;
use refi::selector::{
    Debouncer, Field, FormError, PersonType, Phase, ProfileForm, RemoteLookup, UniversityLookup,
};
use refi::state::AppState;
use refi::universities::{UniversitiesApi, UniversitySource};
use refi::web::create_router;

const DEBOUNCE: Duration = Duration::from_millis(40);

/// Every `(name, country)` pair the fake received.
#[derive(Clone, Default)]
struct Calls(Arc<Mutex<Vec<(String, Option<String>)>>>);

impl Calls {
    fn take(&self) -> Vec<(String, Option<String>)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// Country-narrowed searches for `solo` find nothing; `down` always fails;
/// everything else yields two named records and one nameless record.
async fn fake_search(
    State(calls): State<Calls>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };
    let name = get("name").unwrap_or_default();
    let country = get("country");
    calls.0.lock().unwrap().push((name.clone(), country.clone()));

    if name == "down" {
        return (StatusCode::BAD_GATEWAY, "upstream down").into_response();
    }
    if name == "solo" && country.is_some() {
        return Json(json!([])).into_response();
    }
    Json(json!([
        {"name": format!("{name} University"), "country": "United States"},
        {"name": null},
        {"name": format!("{name} College"), "country": "United States"}
    ]))
    .into_response()
}

async fn fake_universities() -> (String, Calls) {
    let calls = Calls::default();
    let base = spawn_upstream(
        Router::new()
            .route("/search", get(fake_search))
            .with_state(calls.clone()),
    )
    .await;
    (format!("{base}/search"), calls)
}

fn student_form(source: Arc<dyn UniversitySource>) -> ProfileForm {
    let lookup: Arc<dyn RemoteLookup> = Arc::new(UniversityLookup::new(source));
    let mut form = ProfileForm::with_debouncer(lookup, Debouncer::new(DEBOUNCE));
    form.set_person_type(Some(PersonType::Student));
    form
}

/// Poll until the school dropdown has settled with results, or give up.
async fn wait_for_school_results(form: &ProfileForm) -> Vec<String> {
    for _ in 0..100 {
        let snapshot = form.school();
        if snapshot.phase == (Phase::Open { loading: false }) {
            return snapshot.results;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("school lookup never settled: {:?}", form.school());
}

#[tokio::test]
async fn student_picks_school_from_remote_suggestions() {
    let (url, calls) = fake_universities().await;
    let mut form = student_form(Arc::new(UniversitiesApi::new(url).unwrap()));

    form.input(Field::StateResidence, "Calif");
    assert!(form.select(Field::StateResidence, 0));

    form.input(Field::School, "h");
    form.input(Field::School, "ha");
    form.input(Field::School, "har");
    let results = wait_for_school_results(&form).await;
    assert_eq!(results, vec!["har University", "har College"]);
    assert_eq!(calls.take(), vec![("har".to_owned(), None)]);

    assert!(form.select(Field::School, 1));
    form.set_years_resident("4");
    let submission = form.submit().unwrap();
    assert_eq!(submission.state_residence.as_deref(), Some("California"));
    assert_eq!(submission.school.as_deref(), Some("har College"));
    assert_eq!(submission.years_resident, Some(4));
    form.teardown();
}

#[tokio::test]
async fn free_text_school_blocks_submission() {
    let (url, _calls) = fake_universities().await;
    let mut form = student_form(Arc::new(UniversitiesApi::new(url).unwrap()));

    form.input(Field::School, "rice");
    wait_for_school_results(&form).await;
    form.input(Field::School, "rice institute of nowhere");
    tokio::time::sleep(DEBOUNCE * 4).await;

    assert!(form.blur(Field::School).is_err());
    assert!(matches!(form.submit(), Err(FormError::School(_))));
}

#[tokio::test]
async fn failing_upstream_yields_no_suggestions() {
    let (url, calls) = fake_universities().await;
    let mut form = student_form(Arc::new(UniversitiesApi::new(url).unwrap()));

    form.input(Field::School, "down");
    let results = wait_for_school_results(&form).await;
    assert!(results.is_empty());
    assert_eq!(calls.take().len(), 1);
}

#[tokio::test]
async fn narrowed_empty_search_widens_over_http() {
    let (url, calls) = fake_universities().await;
    let source: Arc<dyn UniversitySource> = Arc::new(UniversitiesApi::new(url).unwrap());
    let lookup = UniversityLookup::new(source).with_country("United States");

    let results = lookup.search("solo").await;
    assert_eq!(results, vec!["solo University", "solo College"]);
    assert_eq!(
        calls.take(),
        vec![
            ("solo".to_owned(), Some("United States".to_owned())),
            ("solo".to_owned(), None),
        ]
    );

    let results = lookup.search("duke").await;
    assert_eq!(results.len(), 2);
    assert_eq!(calls.take().len(), 1, "non-empty narrowed search must not widen");
}

#[tokio::test]
async fn lookup_works_through_own_proxy() {
    let (url, calls) = fake_universities().await;
    let upstream: Arc<dyn UniversitySource> = Arc::new(UniversitiesApi::new(url).unwrap());
    let proxy = spawn_upstream(create_router(AppState::new(upstream, None))).await;

    let via_proxy: Arc<dyn UniversitySource> =
        Arc::new(UniversitiesApi::new(format!("{proxy}/api/universities")).unwrap());
    let lookup = UniversityLookup::new(via_proxy);

    assert_eq!(lookup.search("yale").await, vec!["yale University", "yale College"]);
    assert_eq!(lookup.search("yale").await.len(), 2);
    // The second search is served from the proxy's cache.
    assert_eq!(calls.take().len(), 1);
}
