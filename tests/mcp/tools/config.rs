use rf_locale::mcp::{LocaleMcpServer, types::GetConfigParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocaleMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert!(json_result.get("configPath").is_none());
    assert_eq!(
        json_result["config"]["translationsFile"],
        "./locale/translations.json"
    );
    assert!(json_result["config"]["includes"].is_array());
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "translationsFile": "i18n/strings.json",
            "locales": { "de": { "file": "i18n/de.json" } }
        }))
        .unwrap();

    let server = LocaleMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["translationsFile"], "i18n/strings.json");
    assert_eq!(json_result["config"]["locales"]["de"]["file"], "i18n/de.json");
}

#[tokio::test]
async fn test_get_config_invalid_file() {
    let fixture = McpTestFixture::with_files(&[(".rflocalerc.json", "{ broken")]).unwrap();
    let server = LocaleMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    assert!(server.get_config(params).await.is_err());
}
