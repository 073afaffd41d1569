//! Per-model system instructions for prompt rewriting.
//!
//! Each downstream image model gets an [`InstructionSet`] holding one system
//! instruction per [`TaskType`]. A missing instruction means the model does not
//! support that task, and the pipeline passes the prompt through untouched.
//! Lookup is total: unrecognized models receive a generic generation-only set.

use crate::types::TaskType;

/// System instructions for one downstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSet {
    /// Instruction used when generating a new image from text
    pub generation: Option<&'static str>,
    /// Instruction used when editing a supplied image
    pub editing: Option<&'static str>,
}

impl InstructionSet {
    /// The instruction for `task`, if the model supports it.
    pub fn for_task(&self, task: TaskType) -> Option<&'static str> {
        match task {
            TaskType::Generation => self.generation,
            TaskType::Editing => self.editing,
        }
    }

    /// Whether the model has an instruction for `task`.
    pub fn supports(&self, task: TaskType) -> bool {
        self.for_task(task).is_some()
    }
}

const GPTIMAGE_GENERATION: &str = r#"You are an expert prompt writer for 'gptimage', a multimodal image model that produces high-quality images with cleanly rendered, integrated text. Rewrite the user's idea into a comprehensive, descriptive, narrative prompt for **generating a new image from scratch**.

**Core Principles:**
1. **Elaborate, don't abbreviate:** Turn a short idea into a rich description, as if briefing a professional artist or designer.
2. **Put text rendering first:** If the idea involves any text, make it central. Give the exact wording, the typography style (e.g. "elegant calligraphy", "retro-futuristic lettering") and where it sits in the frame.
3. **Describe the whole picture:** Cover subject, background, medium (e.g. "oil painting", "photorealistic", "watercolor"), textures and mood in full, natural sentences.

**Output ONLY the enhanced prompt, with no conversational lead-in.**"#;

const GPTIMAGE_EDITING: &str = r#"You are an expert prompt writer for 'gptimage', a multimodal image model that excels at **editing existing images**. You will receive an image and the user's instruction. Turn them into a detailed command focused on iterative refinement, style transfer and contextual change.

**Core Principles:**
1. **Specify the transformation:** State clearly what must change.
2. **State what is preserved:** Always describe which elements of the original stay as they are (e.g. "preserving the dramatic shadows and facial expressions", "keeping the original composition").
3. **Use precise style language:** For style transfer be concrete (e.g. "render this scene as a traditional Japanese ukiyo-e woodblock print", "apply a solarpunk aesthetic").

**Output ONLY the enhanced prompt, with no conversational lead-in.**"#;

const KONTEXT_GENERATION: &str = r#"You write prompts for 'Kontext' to **generate a new image from scratch**. Kontext follows clear, direct and literal descriptions best. Turn the user's idea into a simple but detailed descriptive prompt.

**Core Principles:**
1. **Be direct and descriptive:** Avoid poetic, abstract or overly artistic language. Describe the scene for a reader who takes every word literally.
2. **Focus on what and where:** Define the subjects, their appearance, what they are doing and where they are placed in the environment.

**Output ONLY the prompt, with no conversational text.**"#;

const KONTEXT_EDITING: &str = r#"You write precise instructions for 'Kontext', an image-to-image editor. You will receive an image and the user's instruction. Convert them into a clear, direct and explicit command that emphasizes control and preservation.

**Core Principles (critical for Kontext):**
1. **Command unambiguously:** Use direct action verbs such as "Change", "Replace", "Add", "Remove".
2. **Preservation is key:** Always say explicitly what stays the same, otherwise Kontext may alter it. Use phrases like "while keeping the same painting style", "keep the person in the exact same position, scale and pose", "preserving his exact facial features and expression".
3. **Handle vague requests safely:** For "make him a viking", do not replace the person. Treat it as a wardrobe change: "Change the man's clothes to a viking warrior outfit, while preserving his exact facial features."
4. **Text edits use one format:** To change text in the image, write exactly: "Replace '[original text]' with '[new text]'".

**Output ONLY the editing command. No conversation.**"#;

const FLUX_GENERATION: &str = r#"You are an expert prompt engineer for 'FLUX.1', a high-fidelity text-to-image model. Rewrite the user's simple idea into a rich, structured and highly detailed prompt for **generating a new image**.

**Core Principles:**
1. **Be hyper-specific:** Give extreme detail. Instead of "a portrait", describe eye color, hair, skin texture and clothing.
2. **Use technical and artistic vocabulary:** Reference artists or movements ("in the style of Vincent van Gogh") and photographic detail ("shot on a 24mm wide-angle lens at f/1.8").

**Output a single, detailed narrative paragraph that reads like descriptive prose.**"#;

const TURBO_GENERATION: &str = r#"You are a prompt engineer for 'Turbo', a model based on Stable Diffusion XL (SDXL). Convert the user's idea into a dense, keyword-rich prompt made of comma-separated descriptive phrases for **generating a new image**.

**Core Principles:**
1. **Keyword-driven phrases:** Output one block of descriptive phrases separated by commas.
2. **Follow the SDXL anatomy:** [Subject], [Detailed Imagery], [Environment], [Mood/Atmosphere], [Style], [Style Execution].

**Output ONLY the comma-separated phrases.**"#;

const GENERIC_GENERATION: &str = r#"Instructions for image prompt diversification:
- Write one distinctive new prompt that describes the same image from a different perspective.
- Keep a clear, vivid description of the image: main subject, setting, colours, lighting and overall mood.
- If no visual style is given, choose the style typically used for that kind of image.
- Respond only with the new prompt. Nothing else."#;

/// Known models and their instruction sets, keyed by lower-case name.
const ENTRIES: &[(&str, InstructionSet)] = &[
    (
        "gptimage",
        InstructionSet {
            generation: Some(GPTIMAGE_GENERATION),
            editing: Some(GPTIMAGE_EDITING),
        },
    ),
    (
        "kontext",
        InstructionSet {
            generation: Some(KONTEXT_GENERATION),
            editing: Some(KONTEXT_EDITING),
        },
    ),
    (
        "flux",
        InstructionSet {
            generation: Some(FLUX_GENERATION),
            editing: None,
        },
    ),
    (
        "turbo",
        InstructionSet {
            generation: Some(TURBO_GENERATION),
            editing: None,
        },
    ),
];

/// Fallback for models the catalog does not know.
const GENERIC: InstructionSet = InstructionSet {
    generation: Some(GENERIC_GENERATION),
    editing: None,
};

/// Static lookup from model name to [`InstructionSet`].
///
/// Holds no state of its own; it is a value so it can be injected into the
/// enhancer alongside the client and cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionCatalog;

impl InstructionCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the instruction set for `model`, ignoring case.
    ///
    /// Never fails: unknown models get the generic generation-only set.
    pub fn lookup(&self, model: &str) -> InstructionSet {
        let normalized = model.to_lowercase();
        ENTRIES
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, set)| *set)
            .unwrap_or(GENERIC)
    }

    /// Shorthand for `lookup(model).for_task(task)`.
    pub fn instruction(&self, model: &str, task: TaskType) -> Option<&'static str> {
        self.lookup(model).for_task(task)
    }

    /// Whether `model` has a dedicated entry (as opposed to the generic fallback).
    pub fn is_known(&self, model: &str) -> bool {
        let normalized = model.to_lowercase();
        ENTRIES.iter().any(|(name, _)| *name == normalized)
    }

    /// Iterate over the dedicated entries in catalog order.
    pub fn known_models(&self) -> impl Iterator<Item = (&'static str, InstructionSet)> {
        ENTRIES.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = InstructionCatalog::new();
        assert_eq!(catalog.lookup("FLUX"), catalog.lookup("flux"));
        assert_eq!(catalog.lookup("Kontext"), catalog.lookup("kontext"));
    }

    #[test]
    fn test_editing_support_matrix() {
        let catalog = InstructionCatalog::new();
        assert!(catalog.lookup("gptimage").supports(TaskType::Editing));
        assert!(catalog.lookup("kontext").supports(TaskType::Editing));
        assert!(!catalog.lookup("flux").supports(TaskType::Editing));
        assert!(!catalog.lookup("turbo").supports(TaskType::Editing));
    }

    #[test]
    fn test_every_known_model_supports_generation() {
        let catalog = InstructionCatalog::new();
        for (name, set) in catalog.known_models() {
            assert!(set.supports(TaskType::Generation), "{name} lacks generation");
        }
    }

    #[test]
    fn test_unknown_model_gets_generic_generation_only() {
        let catalog = InstructionCatalog::new();
        let set = catalog.lookup("some-future-model");
        assert_eq!(set, GENERIC);
        assert!(set.supports(TaskType::Generation));
        assert!(!set.supports(TaskType::Editing));
        assert!(!catalog.is_known("some-future-model"));
    }

    #[test]
    fn test_instruction_selects_task_field() {
        let catalog = InstructionCatalog::new();
        let editing = catalog.instruction("kontext", TaskType::Editing).unwrap();
        assert!(editing.contains("Preservation is key"));
        let generation = catalog.instruction("kontext", TaskType::Generation).unwrap();
        assert_ne!(editing, generation);
        assert!(catalog.instruction("turbo", TaskType::Editing).is_none());
    }

    #[test]
    fn test_instructions_name_their_model() {
        let catalog = InstructionCatalog::new();
        assert!(catalog
            .instruction("flux", TaskType::Generation)
            .unwrap()
            .contains("FLUX.1"));
        assert!(catalog
            .instruction("turbo", TaskType::Generation)
            .unwrap()
            .contains("SDXL"));
    }
}
