//! Development server with live-sync support.
//!
//! Binds the HTTP listener first so requests during the initial build get a
//! loading response, then spawns the actor system on its own runtime thread.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::Result;
use crossbeam::channel::Receiver;
use tiny_http::{Header, Request, Response, Server};

use crate::actor::Coordinator;
use crate::config::Config;
use crate::utils::mime;
use crate::{core, log};

const MAX_PORT_RETRIES: u16 = 10;

/// Number of request worker threads.
const REQUEST_WORKERS: usize = 4;

/// Run the dev server (blocking until shutdown).
pub fn run(config: &Arc<Config>) -> Result<()> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = crossbeam::channel::unbounded::<()>();
    core::register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    let ws_port = config.serve.watch.then_some(config.serve.ws_port);
    let actor_handle = spawn_actors(Arc::clone(config), ws_port, shutdown_rx);

    if config.serve.open_browser {
        crate::utils::browser::open(&config.preview_url());
    }

    run_request_loop(&server);
    wait_for_shutdown(actor_handle);
    Ok(())
}

/// Bind the HTTP listener, walking upward from the configured port when it
/// is already taken.
fn bind_with_retry(interface: std::net::IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Spawn the actor system on a dedicated runtime thread.
fn spawn_actors(
    config: Arc<Config>,
    ws_port: Option<u16>,
    shutdown_rx: Receiver<()>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to create tokio runtime");

        rt.block_on(async {
            let watch = config.serve.watch;
            let mut coordinator = Coordinator::with_config(config)
                .with_watch(watch)
                .with_shutdown_signal(shutdown_rx);
            if let Some(port) = ws_port {
                coordinator = coordinator.with_ws_port(port);
            }
            if let Err(e) = coordinator.run().await {
                log!("actor"; "error: {}", e);
            }
        });
    })
}

/// Wait for the actor system to shutdown gracefully (max 2 seconds).
fn wait_for_shutdown(handle: JoinHandle<()>) {
    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(std::time::Duration::from_millis(50));
    }
}

/// Distribute requests over a small worker pool so a slow response does not
/// block the accept loop.
fn run_request_loop(server: &Server) {
    let (req_tx, req_rx) = crossbeam::channel::unbounded::<Request>();

    for _ in 0..REQUEST_WORKERS {
        let rx = req_rx.clone();
        thread::spawn(move || {
            while let Ok(request) = rx.recv() {
                let config = crate::config::cfg();
                if let Err(e) = handle_request(request, &config) {
                    log!("serve"; "request error: {e}");
                }
            }
        });
    }

    for request in server.incoming_requests() {
        let _ = req_tx.send(request);
    }
}

fn handle_request(request: Request, config: &Config) -> Result<()> {
    if core::is_shutdown() {
        let response = Response::from_string("shutting down").with_status_code(503);
        return Ok(request.respond(response)?);
    }

    if !core::is_serving() {
        return respond_loading(request);
    }

    let Some(path) = resolve_dist_path(request.url(), config) else {
        return respond_not_found(request);
    };

    let content = match std::fs::read(&path) {
        Ok(content) => content,
        Err(_) => return respond_not_found(request),
    };

    let response = Response::from_data(content)
        .with_header(content_type(mime::from_path(&path)))
        .with_header(cors_header(config));
    Ok(request.respond(response)?)
}

/// Resolve a request URL to a file under dist, rejecting traversal.
fn resolve_dist_path(url: &str, config: &Config) -> Option<std::path::PathBuf> {
    let path = url.split('?').next().unwrap_or("/");

    let mut file = config.dist_dir().to_path_buf();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            segment => file.push(segment),
        }
    }

    file.is_file().then_some(file)
}

fn content_type(mime: &str) -> Header {
    Header::from_bytes("Content-Type", mime).expect("static header")
}

/// Browsers loading bundle assets from the store preview need CORS opened
/// toward the store origin.
fn cors_header(config: &Config) -> Header {
    Header::from_bytes("Access-Control-Allow-Origin", config.store_origin()).expect("static header")
}

fn respond_loading(request: Request) -> Result<()> {
    let body = "<!doctype html><html><head><meta http-equiv=\"refresh\" content=\"1\">\
                </head><body><p>building theme…</p></body></html>";
    let response = Response::from_string(body)
        .with_status_code(503)
        .with_header(content_type(mime::types::HTML));
    Ok(request.respond(response)?)
}

fn respond_not_found(request: Request) -> Result<()> {
    let response = Response::from_string("not found").with_status_code(404);
    Ok(request.respond(response)?)
}
