use rf_locale::mcp::{LocaleMcpServer, types::TranslateParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

fn fixture() -> McpTestFixture {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "locales": {
                "fr": { "file": "locale/fr.json" },
                "fr-CA": { "parent": "fr", "file": "locale/fr-CA.json" }
            }
        }))
        .unwrap();
    fixture
        .write_file(
            "locale/fr.json",
            r#"{
    "Save": { "domain": null, "ref": "a.js [1,1]", "translation": "Enregistrer" },
    "Email": { "domain": null, "ref": "a.js [2,1]", "translation": "E-mail" },
    "[null,\"%s file\",\"%s files\"]": {
        "domain": null,
        "ref": "a.js [3,1]",
        "translation": [null, "%s fichier", "%s fichiers"],
        "isJson": true
    },
    "[null,\"There is a validation error\",\"There are %s validation errors\"]": {
        "domain": "errors",
        "ref": "errors.js [1,1]",
        "translation": [null, "Il y a une erreur de validation", "Il y a %s erreurs de validation"],
        "isJson": true
    }
}"#,
        )
        .unwrap();
    fixture
        .write_file(
            "locale/fr-CA.json",
            r#"{ "Email": { "domain": null, "ref": "a.js [2,1]", "translation": "Courriel" } }"#,
        )
        .unwrap();
    fixture
}

fn params(fixture: &McpTestFixture, language: &str, texts: &[&str]) -> Parameters<TranslateParams> {
    Parameters(TranslateParams {
        project_root_path: fixture.root(),
        language: language.to_string(),
        texts: texts.iter().map(|t| t.to_string()).collect(),
        domains: None,
        contexts: None,
        count: None,
    })
}

#[tokio::test]
async fn test_translate_resolves_through_parent() {
    let fixture = fixture();
    let server = LocaleMcpServer::new();

    let result = server
        .translate(params(&fixture, "fr-CA", &["Email", "Save", "Quit"]))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["language"], "fr-CA");
    let items = json_result["items"].as_array().unwrap();
    assert_eq!(items[0]["translation"], "Courriel");
    assert_eq!(items[1]["translation"], "Enregistrer");
    assert_eq!(items[2]["translation"], "Quit");
    assert_eq!(items[2]["isTranslated"], false);
}

#[tokio::test]
async fn test_translate_rejects_empty_texts() {
    let fixture = fixture();
    let server = LocaleMcpServer::new();

    let result = server.translate(params(&fixture, "fr", &[])).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_translate_empty_language_is_identity() {
    let fixture = fixture();
    let server = LocaleMcpServer::new();

    let result = server.translate(params(&fixture, "", &["Save"])).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["items"][0]["translation"], "Save");
    assert_eq!(json_result["items"][0]["isTranslated"], false);
}

#[tokio::test]
async fn test_translate_renders_count() {
    let fixture = fixture();
    let server = LocaleMcpServer::new();

    let mut request = params(&fixture, "fr-CA", &[r#"[null,"%s file","%s files"]"#, "Save"]);
    request.0.count = Some(2);
    let result = server.translate(request).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let items = json_result["items"].as_array().unwrap();
    assert_eq!(items[0]["translation"], r#"[null,"%s fichier","%s fichiers"]"#);
    assert_eq!(items[0]["rendered"], "2 fichiers");
    assert_eq!(items[1]["rendered"], "Enregistrer");
}

#[tokio::test]
async fn test_translate_omits_rendered_without_count() {
    let fixture = fixture();
    let server = LocaleMcpServer::new();

    let result = server.translate(params(&fixture, "fr", &["Save"])).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert!(json_result["items"][0].get("rendered").is_none());
}

#[tokio::test]
async fn test_translate_blank_texts_error_is_localized() {
    let fixture = fixture();
    let server = LocaleMcpServer::new();

    let error = server
        .translate(params(&fixture, "fr-CA", &["Save", " ", ""]))
        .await
        .unwrap_err();
    assert_eq!(error.message, "Il y a 2 erreurs de validation");

    let error = server
        .translate(params(&fixture, "de", &[""]))
        .await
        .unwrap_err();
    assert_eq!(error.message, "There is a validation error");
}
