/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! REST API CLI for apiproblem.

use apiproblem::Problem;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use std::process::ExitCode;

/// Basic CLI that can be extended later.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = init_logger() {
        println!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    let mut args = std::env::args();
    let cli_name = args.next().unwrap_or_default();
    match args.next().as_deref() {
        Some("get") => {
            if let Some(order_id) = args.next() {
                let base_url = args.next().unwrap_or("http://localhost:8080".to_string());
                if let Some(res) = get_order(&base_url, &order_id).await {
                    log::info!("{res}");
                    return ExitCode::SUCCESS;
                }
                return ExitCode::FAILURE;
            }
        }
        Some("put") => {
            if let Some(order_id) = args.next()
                && let Some(order_json) = args.next()
            {
                let base_url = args.next().unwrap_or("http://localhost:8080".to_string());
                if put_order(&base_url, &order_id, order_json).await {
                    return ExitCode::SUCCESS;
                }
                return ExitCode::FAILURE;
            }
        }
        Some(_other) => {}
        None => {}
    }
    log::info!(
        "{cli_name} - apiproblem REST CLI

Usage:
    {cli_name} get <order_id> [base_url]
    {cli_name} put <order_id> <order_json> [base_url]

Example
    {cli_name} put 42 '{{\"customer\":\"Ann\",\"quantity\":1,\"address\":{{\"street\":\"Main\",\"zipCode\":12345}}}}'
    {cli_name} get 42 http://localhost:8080
    "
    );
    ExitCode::FAILURE
}

fn init_logger() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter(Some("hyper_util"), log::LevelFilter::Info)
        .filter(Some("reqwest"), log::LevelFilter::Info)
        .write_style(env_logger::fmt::WriteStyle::Auto)
        .target(env_logger::fmt::Target::Stdout)
        .is_test(false)
        .parse_env(
            env_logger::Env::new()
                .filter("LOG_LEVEL")
                .write_style("LOG_STYLE"),
        )
        .try_init()
}

/// Invoke REST API and load an order.
pub async fn get_order(base_url: &str, order_id: &str) -> Option<String> {
    let url = format!("{base_url}/api/v1/orders/{order_id}");
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("GET '{url}'");
    }
    match reqwest::get(&url).await {
        Ok(response) => match response.status() {
            StatusCode::OK => {
                return response
                    .text()
                    .await
                    .inspect_err(|e| log::warn!("Failed parsing response from '{url}': {e}"))
                    .ok();
            }
            _other_status => log_problem(&url, response).await,
        },
        Err(e) => {
            log::warn!("Request to '{url}' failed: {e}");
        }
    }
    None
}

/// Invoke REST API and store an order.
pub async fn put_order(base_url: &str, order_id: &str, order_json: String) -> bool {
    let url = format!("{base_url}/api/v1/orders/{order_id}");
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("PUT '{url}'");
    }
    let client = reqwest::Client::new();
    match client
        .put(&url)
        .header(CONTENT_TYPE, "application/json")
        .body(order_json)
        .send()
        .await
    {
        Ok(response) => match response.status() {
            StatusCode::CREATED | StatusCode::NO_CONTENT => {
                log::debug!("Ok");
                return true;
            }
            _other_status => log_problem(&url, response).await,
        },
        Err(e) => {
            log::warn!("Request to '{url}' failed: {e}");
        }
    }
    false
}

/// Log the problem details of an error response.
async fn log_problem(url: &str, response: reqwest::Response) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<Problem>(&body) {
        Ok(problem) => log::info!(
            "{} {}{}",
            problem.status.as_u16(),
            problem.title.unwrap_or_default(),
            problem
                .detail
                .map(|detail| format!(": {detail}"))
                .unwrap_or_default()
        ),
        Err(_) => log::info!("Unexpected response status {status} from '{url}': {body}"),
    }
}
