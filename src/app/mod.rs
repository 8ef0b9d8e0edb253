use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use service::{NoService, Service, Services};

use crate::settings::Settings;
use crate::storage::Workbook;

#[derive(Clone)]
pub struct Application {
  pub settings: Arc<Settings>,
  pub workbook: Workbook,
  services: Arc<RwLock<HashMap<String, Arc<dyn Service>>>>,
}

impl Application {
  pub fn new(settings: Arc<Settings>) -> Self {
    let workbook = Workbook::new(settings.database.workbook.clone());

    Application { settings, workbook, services: Arc::new(RwLock::new(HashMap::new())) }
  }
}

impl Services for Application {
  fn register(&mut self, service: Arc<dyn Service>) {
    let path = service.path().to_string();

    let mut services = self.services.write().unwrap();
    if let Some(current) = services.insert(path, service) {
      panic!("service for path {:?} already registered", current.path());
    }
  }

  fn service<S: AsRef<str> + ToString>(&self, name: S) -> Arc<dyn Service> {
    let services = self.services.read().unwrap();
    if let Some(service) = services.get(name.as_ref()) {
      service.clone()
    } else {
      Arc::new(NoService(name.to_string()))
    }
  }
}
