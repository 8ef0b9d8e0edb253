#[macro_use]
extern crate log;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use order_track_backend::api;
use order_track_backend::app::Application;
use order_track_backend::services::{Records, Salesmen, SummaryReport};
use order_track_backend::settings::Settings;
use service::Services;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  std::env::set_var("RUST_LOG", "actix_web=debug,actix_server=debug,order_track_backend=debug");
  env_logger::init();

  let settings = Settings::new()
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

  let mut app = Application::new(Arc::new(settings));
  app.workbook.ensure()?;

  app.register(Records::new(app.clone()));
  app.register(Salesmen::new(app.clone()));
  app.register(SummaryReport::new(app.clone()));

  info!("starting up 127.0.0.1:8080");

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app.clone()))
      .wrap(middleware::Logger::default())
      // the data-entry form is served from another origin
      .wrap(Cors::permissive())
      .service(api::records_find)
      .service(api::records_create)
      .service(api::records_lookup)
      .service(api::records_update)
      .service(api::records_patch)
      .service(api::salesmen_find)
      .service(api::salesmen_create)
      .service(api::report_summary)
      .default_service(web::route().to(api::not_found))
  })
  .bind(("127.0.0.1", 8080))?
  .run()
  .await
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test;

  #[actix_web::test]
  async fn create_and_lookup_over_http() {
    let _ = env_logger::builder().is_test(true).try_init();

    let tmp_dir = tempfile::tempdir().unwrap();

    let mut app = Application::new(Arc::new(Settings::test(tmp_dir.path().into())));
    app.register(Records::new(app.clone()));
    app.register(Salesmen::new(app.clone()));
    app.register(SummaryReport::new(app.clone()));

    let srv = test::init_service(
      App::new()
        .app_data(web::Data::new(app))
        .wrap(middleware::Logger::default())
        .service(api::records_create)
        .service(api::records_lookup)
        .default_service(web::route().to(api::not_found)),
    )
    .await;

    let req = test::TestRequest::post()
      .uri("/records")
      .set_json(serde_json::json!({
        "date_of_request": "2024-03-05",
        "salesman": "Mehmet",
        "customer_name": "Acme",
        "customer_po_no": "PO-77",
        "salesforce_reference": "SF-1",
        "so_no": "SO-100",
        "amount": 250.0,
        "total_discount_pct": 5.0,
        "cps": 50.0,
      }))
      .to_request();

    let created: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
    assert_eq!(created["cpi"].as_f64(), Some(200.0));
    assert_eq!(created["region"], "Unassigned");

    let req = test::TestRequest::post()
      .uri("/records/lookup")
      .set_json(serde_json::json!({ "so_no": "so-100" }))
      .to_request();

    let found: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
    assert_eq!(found["_id"], created["_id"]);
    assert_eq!(found["so_no"], "SO-100");

    let req = test::TestRequest::post()
      .uri("/records/lookup")
      .set_json(serde_json::json!({ "so_no": "SO-404" }))
      .to_request();

    let response = test::call_service(&srv, req).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
  }
}
