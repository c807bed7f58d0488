// src/gui/router.rs
use std::sync::Arc;

use super::pages::{Page, athlete::AthletePage, team::TeamPage};
use crate::config::options::TrackedAthlete;

/// One tab per tracked athlete, then the team overview.
pub fn pages_for(athletes: &[TrackedAthlete]) -> Vec<Arc<dyn Page>> {
    let mut pages: Vec<Arc<dyn Page>> = athletes
        .iter()
        .map(|a| Arc::new(AthletePage::new(a.clone())) as Arc<dyn Page>)
        .collect();
    pages.push(Arc::new(TeamPage));
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::default_athletes;

    #[test]
    fn team_tab_comes_last() {
        let pages = pages_for(&default_athletes());
        let titles: Vec<String> = pages.iter().map(|p| p.title()).collect();
        assert_eq!(titles, ["Annabelle", "Azalea", "Ansel", "Team Overview"]);
    }
}
