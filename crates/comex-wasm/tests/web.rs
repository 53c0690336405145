#![cfg(target_arch = "wasm32")]

use comex_core::{ExtractedData, ProcessingResult};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use comex_wasm::{extract_from_text, process_documents, sample_data, score, ComexApp};

wasm_bindgen_test_configure!(run_in_browser);

fn js(value: serde_json::Value) -> JsValue {
    use serde::Serialize;
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

#[wasm_bindgen_test]
fn test_extract_from_text() {
    let value = extract_from_text("Invoice Nr.: 12345\nContainer: ABCD1234567", None).unwrap();
    let data: ExtractedData = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(data.invoice_number.as_deref(), Some("12345"));
    assert_eq!(data.container_number.as_deref(), Some("ABCD1234567"));

    assert!(extract_from_text("", Some("ocr".to_string())).is_err());
}

#[wasm_bindgen_test]
fn test_sample_scores_full() {
    assert_eq!(score(sample_data().unwrap()).unwrap(), 100.0);
}

#[wasm_bindgen_test]
async fn test_process_and_apply() {
    let files = js(serde_json::json!([
        {"name": "a.pdf", "content": "Invoice Nr.: 12345"},
        {"name": "b.pdf", "content": "SELLER: Australis Mar S.A."},
    ]));

    let result = process_documents(files.clone(), JsValue::UNDEFINED).await.unwrap();
    let parsed: ProcessingResult = serde_wasm_bindgen::from_value(result.clone()).unwrap();
    assert!(parsed.success);

    let mut app = ComexApp::new().unwrap();
    app.clear_all_data().unwrap();
    let client = app
        .create_client(js(serde_json::json!({
            "name": "TRAPANANDA SEAFARMS LLC",
            "email": "contact@trapananda.com",
            "documentTypes": ["invoice", "quality"],
        })))
        .unwrap();
    let client: comex_core::Client = serde_wasm_bindgen::from_value(client).unwrap();
    let order: comex_core::Order =
        serde_wasm_bindgen::from_value(app.create_order(&client.id).unwrap()).unwrap();

    app.apply_processing(&client.id, &order.id, files, result).unwrap();
    let names = app.download_names(&client.id, &order.id).unwrap();
    assert_eq!(names.length(), 2);

    let reopened = ComexApp::new().unwrap();
    let stats: comex_core::store::StorageStats =
        serde_wasm_bindgen::from_value(reopened.stats().unwrap()).unwrap();
    assert_eq!(stats.total_clients, 1);
    assert_eq!(stats.total_generated_docs, 2);

    app.clear_all_data().unwrap();
}
