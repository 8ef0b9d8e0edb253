use std::collections::HashMap;

use actix_web::http::header;
use actix_web::{get, patch, post, put, web, Error, HttpResponse, Responder};
use json::{object, JsonValue};

use service::Services;

use crate::app::Application;

pub async fn not_found() -> impl Responder {
  HttpResponse::NotFound().json("")
}

// the form posts serde_json values, the service bus speaks json::JsonValue
fn parse(data: serde_json::Value) -> Result<JsonValue, service::error::Error> {
  json::parse(&data.to_string())
    .map_err(|e| service::error::Error::GeneralError(e.to_string()))
}

fn respond(result: JsonValue) -> HttpResponse {
  HttpResponse::Ok()
    .append_header(header::ContentType(mime::APPLICATION_JSON))
    .body(result.dump())
}

fn paging(params: &HashMap<String, String>) -> JsonValue {
  let mut page = object! {};

  if let Some(limit) = params.get("$limit").and_then(|v| v.parse::<usize>().ok()) {
    page["$limit"] = limit.into();
  }
  if let Some(skip) = params.get("$skip").and_then(|v| v.parse::<usize>().ok()) {
    page["$skip"] = skip.into();
  }

  page
}

#[get("/records")]
pub async fn records_find(
  app: web::Data<Application>,
  params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, Error> {
  let params = paging(&params);

  let result = web::block(move || app.service("records").find(params)).await??;

  Ok(respond(result))
}

#[post("/records")]
pub async fn records_create(
  app: web::Data<Application>,
  data: web::Json<serde_json::Value>,
) -> Result<HttpResponse, Error> {
  let data = parse(data.into_inner())?;

  let result = web::block(move || app.service("records").create(data, JsonValue::Null)).await??;

  Ok(respond(result))
}

#[post("/records/lookup")]
pub async fn records_lookup(
  app: web::Data<Application>,
  data: web::Json<serde_json::Value>,
) -> Result<HttpResponse, Error> {
  let filter = parse(data.into_inner())?;
  let params = object! { filter: filter };

  let mut result = web::block(move || app.service("records").find(params)).await??;

  match result["data"].array_remove(0) {
    JsonValue::Null => Err(service::error::Error::NotFound("record not found".into()).into()),
    found => Ok(respond(found)),
  }
}

#[put("/records/{id}")]
pub async fn records_update(
  app: web::Data<Application>,
  path: web::Path<String>,
  data: web::Json<serde_json::Value>,
) -> Result<HttpResponse, Error> {
  let id = path.into_inner();
  let data = parse(data.into_inner())?;

  let result =
    web::block(move || app.service("records").update(id, data, JsonValue::Null)).await??;

  Ok(respond(result))
}

#[patch("/records/{id}")]
pub async fn records_patch(
  app: web::Data<Application>,
  path: web::Path<String>,
  data: web::Json<serde_json::Value>,
) -> Result<HttpResponse, Error> {
  let id = path.into_inner();
  let data = parse(data.into_inner())?;

  let result =
    web::block(move || app.service("records").patch(id, data, JsonValue::Null)).await??;

  Ok(respond(result))
}

#[get("/data/salesmen")]
pub async fn salesmen_find(
  app: web::Data<Application>,
  params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, Error> {
  let params = paging(&params);

  let result = web::block(move || app.service("salesmen").find(params)).await??;

  Ok(respond(result))
}

#[post("/data/salesmen")]
pub async fn salesmen_create(
  app: web::Data<Application>,
  data: web::Json<serde_json::Value>,
) -> Result<HttpResponse, Error> {
  let data = parse(data.into_inner())?;

  let result =
    web::block(move || app.service("salesmen").create(data, JsonValue::Null)).await??;

  Ok(respond(result))
}

#[get("/reports/summary")]
pub async fn report_summary(app: web::Data<Application>) -> Result<HttpResponse, Error> {
  let result = web::block(move || app.service("summary-report").find(JsonValue::Null)).await??;

  Ok(respond(result))
}
