//! # product-api
//!
//! A small product catalogue served over HTTP.
//!
//! - **Store** - [`store::ProductStore`], backed by a resource actor
//!   ([`actor_framework::ResourceActor`]) or a document collection
//! - **Gates** - API key check ([`auth`]) then payload validation ([`validation`]),
//!   wired as extractors in [`http::extract`]
//! - **Queries** - filtering, search, pagination and stats ([`query`])
//! - **Errors** - one envelope for every failure ([`error`], [`http::normalize`])
//! - **System** - startup, wiring and shutdown ([`app_system::ProductSystem`])
//!
//! ```no_run
//! use product_api::app_system::{setup_tracing, ProductSystem};
//! use product_api::config::AppConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! setup_tracing();
//! let config = AppConfig::from_env()?;
//! let system = ProductSystem::start(&config);
//! let app = system.router(&config);
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod product_actor;
pub mod query;
pub mod store;
pub mod validation;

#[cfg(test)]
mod mock_framework;
