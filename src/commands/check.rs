//! Report data inconsistencies

use anyhow::Result;

use crate::content::resolver::Inconsistency;
use crate::content::{ContentStore, Resolver};
use crate::Site;

/// Load the site and print every problem found; fails when any exist
pub fn run(site: &Site) -> Result<()> {
    let store = site.load_store()?;
    let problems = report(&store);

    for warning in &problems.warnings {
        println!("warning: {}", warning);
    }
    for problem in &problems.errors {
        println!("error: {}", problem);
    }

    if !problems.errors.is_empty() {
        anyhow::bail!("{} inconsistencies found", problems.errors.len());
    }
    println!(
        "Checked {} posts, {} pillars, {} clusters: OK",
        store.posts.len(),
        store.pillars.len(),
        store.clusters.len()
    );
    Ok(())
}

/// What `check` found
#[derive(Debug, Default)]
pub struct Report {
    pub errors: Vec<Inconsistency>,
    /// Legacy categories that will not get a category page
    pub warnings: Vec<String>,
}

pub fn report(store: &ContentStore) -> Report {
    let resolver = Resolver::new(store);
    Report {
        errors: resolver.inconsistencies(),
        warnings: resolver
            .orphan_categories()
            .into_iter()
            .map(|(category, count)| {
                format!("legacy category `{}` has no cluster ({} posts)", category, count)
            })
            .collect(),
    }
}
