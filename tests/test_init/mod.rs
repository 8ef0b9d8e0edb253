use std::sync::Arc;

use json::JsonValue;
use tempfile::{tempdir, TempDir};

use order_track_backend::app::Application;
use order_track_backend::services::{Records, Salesmen, SummaryReport};
use order_track_backend::settings::Settings;
use service::Services;

pub fn init() -> (TempDir, Application) {
  std::env::set_var("RUST_LOG", "actix_web=debug,order_track_backend=debug");
  let _ = env_logger::builder().is_test(true).try_init();

  let tmp_dir = tempdir().unwrap();

  let settings = Settings::test(tmp_dir.path().into());

  let mut app = Application::new(Arc::new(settings));

  app.register(Records::new(app.clone()));
  app.register(Salesmen::new(app.clone()));
  app.register(SummaryReport::new(app.clone()));

  (tmp_dir, app)
}

#[allow(dead_code)]
pub fn record(so_no: &str, salesman: &str, amount: f64, cps: f64) -> JsonValue {
  json::object! {
    date_of_request: "2024-03-05",
    salesman: salesman,
    customer_name: "Acme",
    customer_po_no: format!("PO-{so_no}"),
    salesforce_reference: "SF-1",
    so_no: so_no,
    amount: amount,
    total_discount_pct: 5,
    cps: cps,
  }
}

#[allow(dead_code)]
pub fn salesman(app: &Application, name: &str, region: &str) -> JsonValue {
  app
    .service("salesmen")
    .create(json::object! { name: name, region: region }, JsonValue::Null)
    .unwrap()
}
