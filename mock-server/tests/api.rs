use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, MockState, Sentence, MALFORMED_BODY};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn parse_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::CONNECTION, "close")
        .body(body.to_string())
        .unwrap()
}

// --- table ---

#[tokio::test]
async fn table_one_entry_per_text() {
    let resp = app()
        .oneshot(parse_request(
            r#"{"texts": ["RT @e_one : Texas", "  ", "wat"], "output_type": "table"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let tables: Vec<String> = body_json(resp).await;
    assert_eq!(tables.len(), 3);
    assert_eq!(
        tables[0],
        "1\tRT\t_\t~\t~\t_\t-1\t_\n2\t@e_one\t_\t@\t@\t_\t-1\t_\n3\t:\t_\t~\t~\t_\t-1\t_\n4\tTexas\t_\t^\t^\t_\t0\t_"
    );
    assert_eq!(tables[1], "");
    assert_eq!(tables[2], "1\twat\t_\tN\tN\t_\t0\t_");
}

#[tokio::test]
async fn empty_texts_give_empty_list() {
    for output in ["table", "tree"] {
        let body = format!(r#"{{"texts": [], "output_type": "{output}"}}"#);
        let resp = app().oneshot(parse_request(&body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let values: Vec<serde_json::Value> = body_json(resp).await;
        assert!(values.is_empty(), "{output}");
    }
}

// --- tree ---

#[tokio::test]
async fn tree_indexes_every_slot() {
    let resp = app()
        .oneshot(parse_request(
            r#"{"texts": ["hello how are you", "", "Where are we going"], "output_type": "tree"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let trees: Vec<Sentence> = body_json(resp).await;
    let indexes: Vec<usize> = trees.iter().map(|s| s.index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
    assert_eq!(trees[0].tokens.len(), 4);
    assert!(trees[1].tokens.is_empty());
    assert!(trees[1].basic_dependencies.is_empty());
    assert_eq!(trees[2].basic_dependencies[0].dep, "ROOT");
}

// --- bad input ---

#[tokio::test]
async fn single_string_returns_422() {
    let resp = app()
        .oneshot(parse_request(r#"{"texts": "hello how are you", "output_type": "table"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn non_string_items_return_422() {
    let resp = app()
        .oneshot(parse_request(r#"{"texts": [1], "output_type": "tree"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_output_type_returns_422() {
    let resp = app()
        .oneshot(parse_request(r#"{"texts": ["x"], "output_type": "conll"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn invalid_json_returns_400() {
    let resp = app().oneshot(parse_request("{\"texts\": [")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_is_not_allowed() {
    let resp = app()
        .oneshot(Request::builder().uri("/").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- fault injection ---

#[tokio::test]
async fn malformed_responses_then_recovery() {
    use tower::Service;

    let state = MockState::with_malformed_responses(2);
    let mut app = app_with_state(state.clone()).into_service();
    let body = r#"{"texts": ["wat"], "output_type": "table"}"#;

    for _ in 0..2 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(parse_request(body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_bytes(resp).await, MALFORMED_BODY.as_bytes());
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(parse_request(body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let tables: Vec<String> = body_json(resp).await;
    assert_eq!(tables, vec!["1\twat\t_\tN\tN\t_\t0\t_"]);

    assert_eq!(state.requests_served(), 3);
}

#[tokio::test]
async fn rejected_requests_are_not_counted() {
    let state = MockState::new();
    let resp = app_with_state(state.clone())
        .oneshot(parse_request(r#"{"texts": [1], "output_type": "table"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.requests_served(), 0);
}
