use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use transport_catalogue::prelude::*;

use crate::requests::StatRequest;

const NOT_FOUND: &str = "not found";
const MAP_UNSUPPORTED: &str = "map rendering is not supported";

/// Answer every stat request in order, one response object each
pub fn answer_requests(
    catalogue: &TransportCatalogue,
    router: Option<&RouteBuilder>,
    requests: &[StatRequest],
) -> Value {
    let responses: Vec<Value> = requests
        .iter()
        .map(|request| match request {
            StatRequest::Bus { id, name } => bus_response(catalogue, *id, name),
            StatRequest::Stop { id, name } => stop_response(catalogue, *id, name),
            StatRequest::Route { id, from, to } => route_response(router, *id, from, to),
            StatRequest::Map { id } => error_response(*id, MAP_UNSUPPORTED),
        })
        .collect();

    Value::Array(responses)
}

fn bus_response(catalogue: &TransportCatalogue, id: i64, name: &str) -> Value {
    let Some(info) = catalogue.bus_info(name) else {
        return error_response(id, NOT_FOUND);
    };
    if info.curvature.is_none() {
        log::debug!("Bus {} has no geographic length, curvature is null", name);
    }

    json!({
        "request_id": id,
        "curvature": info.curvature,
        "route_length": info.route_length,
        "stop_count": info.stop_count,
        "unique_stop_count": info.unique_stop_count,
    })
}

fn stop_response(catalogue: &TransportCatalogue, id: i64, name: &str) -> Value {
    match catalogue.stop_buses(name) {
        // BTreeSet iterates in name order
        Some(buses) => json!({
            "request_id": id,
            "buses": buses.iter().map(|bus| bus.as_str()).collect::<Vec<_>>(),
        }),
        None => error_response(id, NOT_FOUND),
    }
}

fn route_response(router: Option<&RouteBuilder>, id: i64, from: &str, to: &str) -> Value {
    let Some(router) = router else {
        log::warn!("Route request {} without routing_settings", id);
        return error_response(id, NOT_FOUND);
    };

    match router.resolve(from, to) {
        Ok(route) => json!({
            "request_id": id,
            "total_time": route.total_time,
            "items": route.items.iter().map(item_json).collect::<Vec<_>>(),
        }),
        Err(e) => {
            log::debug!("Route {} -> {}: {}", from, to, e);
            error_response(id, NOT_FOUND)
        }
    }
}

fn item_json(item: &Item) -> Value {
    match item {
        Item::Wait { stop, time } => json!({
            "type": "Wait",
            "stop_name": stop.as_str(),
            "time": time,
        }),
        Item::Bus {
            bus,
            span_count,
            time,
        } => json!({
            "type": "Bus",
            "bus": bus.as_str(),
            "span_count": span_count,
            "time": time,
        }),
    }
}

fn error_response(id: i64, message: &str) -> Value {
    json!({
        "request_id": id,
        "error_message": message,
    })
}

/// Write JSON to `output`, or stdout when no path is given
pub fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>, pretty: bool) -> Result<()> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');

    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}
