//! `fission cache` command handler.

use anyhow::Result;

use fission::cache::{CacheStats, ResponseCache};
use fission::config::Config;

use super::{open_cache, CacheAction};

/// Handle `fission cache` subcommands.
pub(crate) fn cmd_cache(config: &Config, action: CacheAction) -> Result<()> {
    let cache = open_cache(config)?;
    println!("{}", run_action(&cache, action));
    Ok(())
}

fn run_action(cache: &ResponseCache, action: CacheAction) -> String {
    match action {
        CacheAction::Stats => format_stats(&cache.stats()),
        CacheAction::Clear => {
            let removed = cache.invalidate(None);
            format!("Cleared {} cache record(s).", removed)
        }
        CacheAction::Purge => {
            let removed = cache.purge_expired();
            format!("Purged {} expired cache record(s).", removed)
        }
    }
}

fn format_stats(stats: &CacheStats) -> String {
    format!(
        "Cache directory: {}\n\
         Total entries:   {}\n\
         Valid entries:   {}\n\
         Expired entries: {}\n\
         Total size:      {:.2} MB",
        stats.cache_dir.display(),
        stats.total_entries,
        stats.valid_entries,
        stats.expired_entries,
        stats.total_size_mb,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn cache_with_records(tmp: &TempDir) -> ResponseCache {
        let cache = ResponseCache::open(tmp.path(), 3600).unwrap();
        cache.store(&json!({"n": 1}), &json!("fresh"), Some(1000));
        cache.store(&json!({"n": 2}), &json!("stale"), Some(-1));
        cache
    }

    #[test]
    fn test_stats_output() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_with_records(&tmp);
        let out = run_action(&cache, CacheAction::Stats);
        assert!(out.contains("Total entries:   2"));
        assert!(out.contains("Valid entries:   1"));
        assert!(out.contains("Expired entries: 1"));
    }

    #[test]
    fn test_purge_then_clear() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_with_records(&tmp);
        assert_eq!(
            run_action(&cache, CacheAction::Purge),
            "Purged 1 expired cache record(s)."
        );
        assert_eq!(
            run_action(&cache, CacheAction::Clear),
            "Cleared 1 cache record(s)."
        );
        assert_eq!(cache.stats().total_entries, 0);
    }
}
