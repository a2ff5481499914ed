//! Canned suggestions served when the generation service can't be used.
//!
//! Content is deterministic so callers (and tests) can rely on it. It is
//! never written to the cache.

use crate::types::{DeeperName, DeeperSuggestions, DeeperThread, NameResult, NameSuggestions, Thread};

/// (name, category, meaning, origin)
const FALLBACK_NAMES: [(&str, &str, &str, &str); 10] = [
    ("Prometheus", "mythology", "Titan who brought fire to humanity", "Greek"),
    ("Nexus", "modern", "Connection point, central hub", "Latin"),
    ("Aurora", "nature", "Dawn, new beginnings", "Roman goddess"),
    ("Quantum", "scientific", "Discrete unit, fundamental", "Physics"),
    ("Catalyst", "abstract", "Agent of change", "Chemistry"),
    ("Atlas", "mythology", "Titan who held up the sky", "Greek"),
    ("Zenith", "nature", "Highest point", "Astronomy"),
    ("Helix", "scientific", "Spiral structure", "Biology"),
    ("Vanguard", "historical", "Leading position", "Military"),
    ("Flux", "abstract", "Continuous change", "Physics"),
];

fn fallback_id(index: usize) -> String {
    format!("f{}", index + 1)
}

/// First `num_results` canned names plus two fixed threads.
pub fn generate(num_results: u32) -> NameSuggestions {
    let names = FALLBACK_NAMES
        .iter()
        .take(num_results as usize)
        .enumerate()
        .map(|(i, (name, category, meaning, origin))| NameResult {
            id: fallback_id(i),
            name: name.to_string(),
            category: category.to_string(),
            origin: Some(origin.to_string()),
            meaning: Some(meaning.to_string()),
            pronunciation: None,
            tags: None,
        })
        .collect();

    let threads = vec![
        Thread {
            thread_id: 0,
            title: "Mythological".to_string(),
            description: Some("Names from mythology".to_string()),
            name_ids: Some(vec!["f1".to_string(), "f6".to_string()]),
        },
        Thread {
            thread_id: 1,
            title: "Scientific".to_string(),
            description: Some("Technical terms".to_string()),
            name_ids: Some(vec!["f4".to_string(), "f8".to_string()]),
        },
    ];

    NameSuggestions {
        names,
        threads: Some(threads),
    }
}

fn entry(id: &str, name: impl Into<String>, meaning: impl Into<String>, origin: &str) -> DeeperName {
    DeeperName {
        id: id.to_string(),
        name: name.into(),
        meaning: Some(meaning.into()),
        origin: Some(origin.to_string()),
    }
}

/// Three canned dimensions for `name`; the remix thread derives from it.
pub fn deeper(name: &str) -> DeeperSuggestions {
    let threads = vec![
        DeeperThread {
            dimension: "same_family".to_string(),
            title: "Same Family".to_string(),
            description: Some("Related names from the same origin".to_string()),
            names: vec![
                entry("d1", "Helios", "Greek god of the sun", "Greek"),
                entry("d2", "Selene", "Greek goddess of the moon", "Greek"),
            ],
        },
        DeeperThread {
            dimension: "similar_meaning".to_string(),
            title: "Similar Meaning".to_string(),
            description: Some("Names with related meanings".to_string()),
            names: vec![
                entry("d3", "Lumina", "Light, illumination", "Latin"),
                entry("d4", "Radiant", "Emitting light or energy", "English"),
            ],
        },
        DeeperThread {
            dimension: "syllable_remix".to_string(),
            title: "Creative Variations".to_string(),
            description: Some("Syllable combinations and remixes".to_string()),
            names: vec![
                entry("d5", format!("{}ex", name), format!("Variation of {}", name), "Coined"),
                entry("d6", format!("{}ia", name), format!("Variation of {}", name), "Coined"),
            ],
        },
    ];

    DeeperSuggestions {
        source_name: name.to_string(),
        threads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_takes_prefix() {
        let payload = generate(5);
        let names: Vec<&str> = payload.names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Prometheus", "Nexus", "Aurora", "Quantum", "Catalyst"]);
        assert_eq!(payload.names[4].id, "f5");
        assert_eq!(payload.threads.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_generate_caps_at_catalogue_size() {
        assert_eq!(generate(50).names.len(), 10);
        assert!(generate(0).names.is_empty());
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(generate(7), generate(7));
    }

    #[test]
    fn test_deeper_remixes_source_name() {
        let payload = deeper("Orbit");
        assert_eq!(payload.source_name, "Orbit");
        assert_eq!(payload.threads.len(), 3);
        let remix = &payload.threads[2];
        assert_eq!(remix.dimension, "syllable_remix");
        assert_eq!(remix.names[0].name, "Orbitex");
        assert_eq!(remix.names[1].name, "Orbitia");
        assert_eq!(remix.names[1].meaning.as_deref(), Some("Variation of Orbit"));
    }
}
