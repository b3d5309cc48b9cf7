//! Fixed inspection prompt and the strict response schema sent alongside it.
//!
//! Both are static; there are no inputs and no failure modes.

use ppeguard_core::PpeItem;
use serde_json::{Value, json};

const PROMPT: &str = "\
You are an HSE (health, safety and environment) inspector in a pharmaceutical \
factory. Analyze the provided image and verify the worker's personal protective \
equipment (PPE) compliance.

Check that each of the following items is present and worn correctly: hairnet, \
face mask, protective suit, gloves, and safety shoes.

For each item, state whether it is compliant, give a short reason in Arabic, and \
give a bounding box in normalized coordinates (0-1) relative to the image. Keep \
boxes tight around the item, especially for the hairnet and the face mask.

If everything is correct, give a positive summary in Arabic. If there are \
problems, the summary must state that the worker may not enter the production \
line and what to correct.

Return the result as strict JSON matching the provided schema.";

/// The fixed instruction string for the vision model.
pub fn inspection_prompt() -> &'static str {
    PROMPT
}

/// Structured output schema constraining the model's JSON response.
///
/// Uses the Gemini REST schema vocabulary (uppercase type names); the OpenAI
/// path embeds the same expectation in the prompt only.
pub fn response_schema() -> Value {
    let item_names: Vec<&str> = PpeItem::ALL.iter().map(|i| i.wire_name()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "findings": {
                "type": "ARRAY",
                "description": "List of PPE findings for each required item.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "ppeItem": {
                            "type": "STRING",
                            "enum": item_names,
                            "description": "The type of PPE item being checked."
                        },
                        "compliant": {
                            "type": "BOOLEAN",
                            "description": "True if the PPE is worn correctly, false otherwise."
                        },
                        "reason": {
                            "type": "STRING",
                            "description": "A short explanation in Arabic about the finding."
                        },
                        "boundingBox": {
                            "type": "OBJECT",
                            "description": "Normalized coordinates (0-1) of the bounding box for the item or missing area.",
                            "properties": {
                                "x": { "type": "NUMBER" },
                                "y": { "type": "NUMBER" },
                                "width": { "type": "NUMBER" },
                                "height": { "type": "NUMBER" }
                            },
                            "required": ["x", "y", "width", "height"]
                        }
                    },
                    "required": ["ppeItem", "compliant", "reason", "boundingBox"]
                }
            },
            "summary": {
                "type": "STRING",
                "description": "An overall summary message in Arabic for the user."
            },
            "overallCompliant": {
                "type": "BOOLEAN",
                "description": "True if all PPE items are compliant."
            }
        },
        "required": ["findings", "summary", "overallCompliant"]
    })
}
