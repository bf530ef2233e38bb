//! # Search Console
//!
//! Shared search state and a developer debug panel for a search front-end.
//!
//! The search state store (current term, current source, latest results)
//! lives in [`search_console_core`]. This crate wires it to real
//! collaborators and exposes it through a CLI (`scon`) and an HTTP host.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────────┐
//! │ SCON_SEARCH_ │──▶│  DataProvider    │──▶│  DataContext   │
//! │ SOURCE (env) │   │  (mount/unmount) │   │  term/source/  │
//! └──────────────┘   └──────────────────┘   │  results       │
//!                                           └───────┬────────┘
//!                        ┌──────────────────────────┤ watch
//!                        ▼                          ▼
//!                 ┌──────────────┐          ┌──────────────┐
//!                 │ DebugPanel   │─ fetch ─▶│ Filename API │
//!                 │ (static src) │          │  (reqwest)   │
//!                 └──────┬───────┘          └──────────────┘
//!                        ▼
//!                 ┌──────────────┐   ┌──────────────┐
//!                 │ RouteTracker │   │  ToastQueue  │
//!                 └──────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! scon resolve                              # which source would the session start on?
//! SCON_SEARCH_SOURCE=static scon panel      # render the panel with fetched filenames
//! scon panel --select static --use a.txt    # pick a filename as the search term
//! scon serve                                # start the HTTP host
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`traits`] | Collaborator traits (lister, navigator, notifier) |
//! | [`api`] | HTTP filename lister |
//! | [`navigation`] | Route tracking |
//! | [`notify`] | Toast acknowledgements |
//! | [`debug_panel`] | The debug panel |
//! | [`session`] | Application entry wiring |
//! | [`server`] | HTTP host |

pub mod api;
pub mod config;
pub mod debug_panel;
pub mod logging;
pub mod navigation;
pub mod notify;
pub mod server;
pub mod session;
pub mod traits;
