mod common;

use rohbot::api::process_streaming_response;
use rohbot::orchestrator::TurnObserver;
use std::sync::Mutex;

struct RecordingObserver {
    tokens: Mutex<Vec<String>>,
}

impl TurnObserver for RecordingObserver {
    fn on_token(&self, token: &str) {
        self.tokens.lock().unwrap().push(token.to_string());
    }
}

fn sse_body(events: &[&str]) -> String {
    let mut body = String::new();
    for event in events {
        body.push_str("data: ");
        body.push_str(event);
        body.push_str("\n\n");
    }
    body.push_str("data: [DONE]\n\n");
    body
}

#[tokio::test]
async fn content_deltas_accumulate_and_reach_the_observer() {
    let body = sse_body(&[
        r#"{"choices":[{"delta":{"content":"Ahoj"}}]}"#,
        r#"{"choices":[{"delta":{"content":" světe"}}]}"#,
    ]);
    let service = common::spawn(move |_| (200, body.clone())).await;

    let response = reqwest::get(&service.base_url).await.unwrap();
    let observer = RecordingObserver {
        tokens: Mutex::new(Vec::new()),
    };

    let result = process_streaming_response(response, 5, false, &observer)
        .await
        .unwrap();

    assert_eq!(result.content, "Ahoj světe");
    assert!(result.tool_calls.is_empty());
    assert_eq!(
        observer.tokens.lock().unwrap().clone(),
        vec!["Ahoj".to_string(), " světe".to_string()]
    );
}

#[tokio::test]
async fn streamed_tool_call_fragments_are_assembled() {
    let body = sse_body(&[
        r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_abc","type":"function","function":{"name":"search_recipes","arguments":""}}]}}]}"#,
        r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"{\"diet\":"}}]}}]}"#,
        r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"\"vegan\"}"}}]}}]}"#,
    ]);
    let service = common::spawn(move |_| (200, body.clone())).await;

    let response = reqwest::get(&service.base_url).await.unwrap();
    let observer = RecordingObserver {
        tokens: Mutex::new(Vec::new()),
    };

    let result = process_streaming_response(response, 5, false, &observer)
        .await
        .unwrap();

    assert!(result.content.is_empty());
    assert_eq!(result.tool_calls.len(), 1);
    let call = &result.tool_calls[0];
    assert_eq!(call.id, "call_abc");
    assert_eq!(call.function.name, "search_recipes");
    assert_eq!(call.function.arguments, r#"{"diet":"vegan"}"#);
}

#[tokio::test]
async fn parallel_tool_calls_keep_their_own_argument_buffers() {
    let body = sse_body(&[
        r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_1","function":{"name":"get_shopping_list","arguments":"{}"}}]}}]}"#,
        r#"{"choices":[{"delta":{"tool_calls":[{"index":1,"id":"call_2","function":{"name":"get_all_recipes","arguments":"{"}}]}}]}"#,
        r#"{"choices":[{"delta":{"tool_calls":[{"index":1,"function":{"arguments":"}"}}]}}]}"#,
    ]);
    let service = common::spawn(move |_| (200, body.clone())).await;

    let response = reqwest::get(&service.base_url).await.unwrap();
    let observer = RecordingObserver {
        tokens: Mutex::new(Vec::new()),
    };

    let result = process_streaming_response(response, 5, false, &observer)
        .await
        .unwrap();

    assert_eq!(result.tool_calls.len(), 2);
    assert_eq!(result.tool_calls[0].id, "call_1");
    assert_eq!(result.tool_calls[0].function.arguments, "{}");
    assert_eq!(result.tool_calls[1].id, "call_2");
    assert_eq!(result.tool_calls[1].function.name, "get_all_recipes");
    assert_eq!(result.tool_calls[1].function.arguments, "{}");
}

#[tokio::test]
async fn stream_ending_without_done_still_returns_content() {
    let body = "data: {\"choices\":[{\"delta\":{\"content\":\"Nedokončený\"}}]}\n\n".to_string();
    let service = common::spawn(move |_| (200, body.clone())).await;

    let response = reqwest::get(&service.base_url).await.unwrap();
    let observer = RecordingObserver {
        tokens: Mutex::new(Vec::new()),
    };

    let result = process_streaming_response(response, 5, false, &observer)
        .await
        .unwrap();

    assert_eq!(result.content, "Nedokončený");
}
