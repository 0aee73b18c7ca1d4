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

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod config;

use apiproblem::OrderRegistry;
use std::process::ExitCode;
use tokio::signal::unix::SignalKind;
use tokio::signal::unix::signal;

/// Application main entrypoint.
fn main() -> ExitCode {
    if let Err(e) = init_logger() {
        println!("Failed to initialize logging: {e:?}");
        return ExitCode::FAILURE;
    }
    // Defaults to using one thread per core when no limit is set.
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(run_async(
        &config::bind_address(),
        config::bind_port(),
        config::max_body_bytes(),
    ))
}

/// Initialize the logging system and apply filters.
fn init_logger() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .filter(Some("actix_server::builder"), log::LevelFilter::Warn)
        .filter(Some("h2"), log::LevelFilter::Info)
        .filter(Some("actix_server::server"), log::LevelFilter::Warn)
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

/// Async code entry point.
pub async fn run_async(
    http_bind_address: &str,
    http_bind_port: u16,
    max_body_bytes: usize,
) -> ExitCode {
    let orders = OrderRegistry::new();
    let app_future = apiproblem_api_rest::rest_api::run_http_server(
        &orders,
        http_bind_address,
        http_bind_port,
        max_body_bytes,
    );
    let signals_future = block_until_signaled();
    let res = tokio::select! {
        res = app_future => {
            log::trace!("app_future finished");
            res
        },
        res = signals_future => {
            log::trace!("signals_future finished");
            res.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        },
    }
    .map_err(|e| log::error!("{e}"));
    if res.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Block until SIGTERM or SIGINT is recieved.
async fn block_until_signaled() -> Result<(), std::io::Error> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigterm.recv() => {
            log::trace!("SIGTERM recieved.")
        },
        _ = sigint.recv() => {
            log::trace!("SIGINT recieved.")
        },
    };
    Ok(())
}
