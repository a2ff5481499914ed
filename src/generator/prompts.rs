//! Prompt rendering and the static name catalogue.

use serde_json::Value;

use crate::types::Category;

/// System instruction shared by both request kinds.
pub const SYSTEM_PROMPT: &str = "You are Fission, an expert business name generator with deep knowledge of:
- Greek, Roman, Norse, Egyptian, Hindu, Celtic, and other mythologies
- Etymology and word origins across languages (Latin, Greek, Sanskrit, Old English, etc.)
- Modern naming conventions for tech startups, brands, and companies
- Phonetic analysis and memorable name construction
- Domain naming and syllable aesthetics

When generating names:
1. Provide diverse options across multiple categories
2. Ensure names are pronounceable and memorable
3. Avoid names with negative connotations in major languages
4. Include a brief, useful meaning for each name
5. Consider the business context provided

You must output valid JSON only. No markdown, no explanations outside the JSON.";

/// Dimensions a `deeper` request can explore.
pub const DIMENSIONS: &[(&str, &str)] = &[
    (
        "same_family",
        "SAME FAMILY: siblings, relatives or the same pantheon for mythological names; \
         similar construction patterns for coined names; related phenomena for nature names.",
    ),
    (
        "similar_meaning",
        "SIMILAR MEANING: names from other origins that convey the same core concept.",
    ),
    (
        "phonetic",
        "PHONETIC SIBLINGS: names that share syllable patterns, rhythm, rhyme or alliteration.",
    ),
    (
        "syllable_remix",
        "SYLLABLE REMIXES: new pronounceable names built from its syllables, common suffixes \
         (-ex, -ix, -us, -ia, -ium, -io, -on), blends with related concepts or reordered syllables.",
    ),
    (
        "cross_cultural",
        "CROSS-CULTURAL: the same archetype or meaning in other mythologies and cultures.",
    ),
];

const CATEGORY_GUIDE: &str = "- mythology: Names from Greek, Roman, Norse, or other mythologies
- scientific: Technical/scientific terms that sound professional
- modern: Contemporary coined names (tech-style, portmanteaus)
- nature: Names inspired by natural phenomena, elements, celestial bodies
- abstract: Conceptual names (qualities, actions, states)
- historical: Names from history, ancient civilizations, classical references";

const GENERATE_FORMAT: &str = r#"{
  "names": [
    {
      "id": "name_1",
      "name": "ExampleName",
      "category": "mythology",
      "origin": "Greek - Titan of light",
      "meaning": "Brief explanation of the name's meaning and why it fits",
      "pronunciation": "ex-AM-pull",
      "tags": ["power", "light", "technology"]
    }
  ],
  "threads": [
    {
      "thread_id": 0,
      "title": "Mythological Power",
      "description": "Names from mythology conveying strength",
      "name_ids": ["name_1", "name_2"]
    }
  ]
}"#;

const DEEPER_FORMAT: &str = r#"{
  "source_name": "SOURCE",
  "threads": [
    {
      "dimension": "same_family",
      "title": "Same Family",
      "description": "Brief description of this dimension",
      "names": [
        {
          "id": "deeper_1",
          "name": "RelatedName",
          "meaning": "Brief explanation",
          "origin": "Origin info"
        }
      ]
    }
  ]
}"#;

/// Six browsable categories.
pub static CATEGORIES: [Category; 6] = [
    Category {
        id: "mythology",
        name: "Mythology",
        description: "Names from Greek, Roman, Norse, and other mythologies",
        color: "#8b5cf6",
    },
    Category {
        id: "scientific",
        name: "Scientific",
        description: "Technical and scientific terms",
        color: "#06b6d4",
    },
    Category {
        id: "modern",
        name: "Modern",
        description: "Contemporary coined names and portmanteaus",
        color: "#f59e0b",
    },
    Category {
        id: "nature",
        name: "Nature",
        description: "Natural phenomena, elements, celestial bodies",
        color: "#10b981",
    },
    Category {
        id: "abstract",
        name: "Abstract",
        description: "Conceptual names representing qualities and ideas",
        color: "#ec4899",
    },
    Category {
        id: "historical",
        name: "Historical",
        description: "Names from history and ancient civilizations",
        color: "#6366f1",
    },
];

pub const EXAMPLE_PROMPTS: [&str; 8] = [
    "Hyperion",
    "AI startup for creators",
    "Premium sustainable fashion brand",
    "Fintech app for Gen Z",
    "Cybersecurity company",
    "Health and wellness platform",
    "Space exploration company",
    "Luxury electric vehicles",
];

/// Render the user message for a `generate` request.
pub fn render_generate_prompt(
    prompt: &str,
    num_results: u32,
    style: &str,
    categories: &[String],
) -> String {
    let focus = if categories.is_empty() {
        String::new()
    } else {
        format!("\nFocus on these categories: {}\n", categories.join(", "))
    };

    format!(
        "Generate {num_results} unique business name suggestions based on this prompt:\n\n\
         \"{prompt}\"\n\n\
         Style: {style}\n\n\
         Categories to include:\n{CATEGORY_GUIDE}\n{focus}\n\
         Output ONLY valid JSON in this exact format:\n{GENERATE_FORMAT}\n\n\
         Generate exactly {num_results} names with good variety across categories. \
         Group them into 4-6 thematic threads."
    )
}

/// Render the user message for a `deeper` request.
///
/// An empty `dimensions` slice asks for all of [`DIMENSIONS`]; unknown names
/// are dropped.
pub fn render_deeper_prompt(name: &str, context: &str, dimensions: &[String]) -> String {
    let context = if context.trim().is_empty() {
        "general business"
    } else {
        context
    };

    let selected: Vec<&str> = DIMENSIONS
        .iter()
        .filter(|(id, _)| dimensions.is_empty() || dimensions.iter().any(|d| d == id))
        .map(|(_, guide)| *guide)
        .collect();
    let selected = if selected.is_empty() {
        DIMENSIONS.iter().map(|(_, guide)| *guide).collect()
    } else {
        selected
    };

    let guide = selected
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {}", i + 1, text))
        .collect::<Vec<_>>()
        .join("\n\n");
    // The name lands inside a JSON string literal of the format example.
    let quoted = Value::String(name.to_string()).to_string();
    let format = DEEPER_FORMAT.replace("SOURCE", &quoted[1..quoted.len() - 1]);

    format!(
        "The user is exploring the name \"{name}\" for a business.\n\
         Context: {context}\n\n\
         Generate related names across these {count} dimensions:\n\n{guide}\n\n\
         Output ONLY valid JSON in this exact format:\n{format}\n\n\
         Generate 5-8 names per dimension. Make them diverse and interesting.",
        count = selected.len(),
    )
}
