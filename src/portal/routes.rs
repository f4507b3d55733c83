use crate::domain::model::{ChangeFrequency, RouteEntry};
use crate::portal::dashboard::DashboardPage;

/// The portal's own pages. Dashboards are role-gated and therefore never
/// indexed; they are listed so that robots.txt can disallow them.
pub fn route_table() -> Vec<RouteEntry> {
    let mut routes = vec![
        RouteEntry::public("/")
            .with_changefreq(ChangeFrequency::Daily)
            .with_priority(1.0),
        RouteEntry::public("/courses")
            .with_changefreq(ChangeFrequency::Daily)
            .with_priority(0.8),
        RouteEntry::public("/about")
            .with_changefreq(ChangeFrequency::Monthly)
            .with_priority(0.5),
    ];

    for page in [DashboardPage::Student, DashboardPage::Teacher] {
        routes.push(RouteEntry::gated(page.route_path(), page.access()));
    }

    routes
}
