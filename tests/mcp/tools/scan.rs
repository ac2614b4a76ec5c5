use rf_locale::mcp::{LocaleMcpServer, types::ScanSourcesParams};
use rmcp::handler::server::wrapper::Parameters;

use crate::{McpTestFixture, assert_pagination, extract_tool_result_json};

fn params(fixture: &McpTestFixture, limit: Option<u32>, offset: Option<u32>) -> Parameters<ScanSourcesParams> {
    Parameters(ScanSourcesParams {
        project_root_path: fixture.root(),
        limit,
        offset,
    })
}

#[tokio::test]
async fn test_scan_sources_lists_records() {
    let fixture = McpTestFixture::with_files(&[(
        "src/app.js",
        "_('Hello');\n_d('ui', 'Save');\n",
    )])
    .unwrap();
    let server = LocaleMcpServer::new();

    let result = server.scan_sources(params(&fixture, None, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["filesScanned"], 1);
    assert_eq!(json_result["totalCount"], 2);
    assert_eq!(json_result["errorCount"], 0);

    let items = json_result["items"].as_array().unwrap();
    assert_eq!(items[0]["functionName"], "_");
    assert_eq!(items[0]["filePath"], "src/app.js");
    assert_eq!(items[0]["source"][0], "'Hello'");
    assert_eq!(items[1]["domain"], "'ui'");
    assert_pagination(&json_result, 0, 50, false);
}

#[tokio::test]
async fn test_scan_sources_counts_issues() {
    let fixture =
        McpTestFixture::with_files(&[("app.js", "_d('ui');\n_(label);\n")]).unwrap();
    let server = LocaleMcpServer::new();

    let result = server.scan_sources(params(&fixture, None, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["errorCount"], 1);
    assert_eq!(json_result["warningCount"], 1);
    assert!(json_result["items"][0]["error"].is_string());
}

#[tokio::test]
async fn test_scan_sources_pagination() {
    let source: String = (0..5).map(|i| format!("_('text {}');\n", i)).collect();
    let fixture = McpTestFixture::with_files(&[("app.js", &source)]).unwrap();
    let server = LocaleMcpServer::new();

    let result = server
        .scan_sources(params(&fixture, Some(2), Some(1)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    let items = json_result["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["line"], 2);
    assert_eq!(json_result["totalCount"], 5);
    assert_pagination(&json_result, 1, 2, true);
}

#[tokio::test]
async fn test_scan_sources_limit_is_capped() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocaleMcpServer::new();

    let result = server
        .scan_sources(params(&fixture, Some(1000), None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_pagination(&json_result, 0, 200, false);
}
