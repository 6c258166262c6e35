use serde::Serialize;
use storymaker_client::HealthReport;
use storymaker_config::Service;

/// Health indicators for every service, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthRow {
  pub reports: Vec<HealthReport>,
}

impl HealthRow {
  pub fn new(reports: Vec<HealthReport>) -> Self {
    Self { reports }
  }

  pub fn all_ok(&self) -> bool {
    !self.reports.is_empty() && self.reports.iter().all(|r| r.ok)
  }

  pub fn unhealthy(&self) -> impl Iterator<Item = &HealthReport> {
    self.reports.iter().filter(|r| !r.ok)
  }

  pub fn get(&self, service: Service) -> Option<&HealthReport> {
    self.reports.iter().find(|r| r.service == service)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn report(service: Service, ok: bool) -> HealthReport {
    HealthReport {
      service,
      url: format!("http://127.0.0.1{}", service.health_path()),
      ok,
      detail: (!ok).then(|| "503".to_string()),
    }
  }

  #[test]
  fn test_empty_row_is_not_ok() {
    assert!(!HealthRow::default().all_ok());
  }

  #[test]
  fn test_unhealthy_services() {
    let row = HealthRow::new(vec![
      report(Service::Worldcore, true),
      report(Service::Media, false),
      report(Service::Orchestration, true),
    ]);

    assert!(!row.all_ok());
    let down: Vec<Service> = row.unhealthy().map(|r| r.service).collect();
    assert_eq!(down, vec![Service::Media]);
    assert_eq!(
      row.get(Service::Media).and_then(|r| r.detail.as_deref()),
      Some("503")
    );
    assert!(row.get(Service::Interact).is_none());
  }
}
