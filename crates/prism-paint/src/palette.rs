//! Duplicate-free color palettes and a name-keyed palette library.

use prism_color::Srgb;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::host::PaletteStore;

/// Name given to a palette created for an empty tool slot.
pub const DEFAULT_PALETTE_NAME: &str = "Palette";

/// Ordered list of distinct sRGB colors.
///
/// Deserialized colors go through [`Palette::add`], so repeats in a file are
/// dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaletteData")]
pub struct Palette {
    pub name: String,
    colors: Vec<Srgb>,
}

impl Palette {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: Vec::new(),
        }
    }

    /// Appends `color` unless an equal entry is already present.
    ///
    /// Returns `true` if the color was appended.
    pub fn add(&mut self, color: Srgb) -> bool {
        if self.contains(color) {
            return false;
        }
        self.colors.push(color);
        true
    }

    /// Exact, component-wise membership test.
    pub fn contains(&self, color: Srgb) -> bool {
        self.colors.iter().any(|&c| c == color)
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[derive(Deserialize)]
struct PaletteData {
    name: String,
    #[serde(default)]
    colors: Vec<Srgb>,
}

impl From<PaletteData> for Palette {
    fn from(data: PaletteData) -> Self {
        let stored = data.colors.len();
        let mut palette = Palette::new(data.name);
        for color in data.colors {
            palette.add(color);
        }
        if palette.len() < stored {
            tracing::warn!(
                "Palette {:?} listed {} repeated colors; kept the first of each",
                palette.name,
                stored - palette.len()
            );
        }
        palette
    }
}

/// Identifies which palette an operation collects into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteKey {
    /// The palette assigned to the vertex paint tool. An empty slot gets a
    /// new palette named [`DEFAULT_PALETTE_NAME`].
    #[default]
    ToolSlot,
    /// A palette by name, e.g. one per mesh.
    Named(String),
}

/// In-memory [`PaletteStore`]: palettes by name in creation order, plus the
/// tool slot.
///
/// The name index is rebuilt on deserialization. If two palettes share a
/// name, lookups resolve to the first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "LibraryData")]
pub struct PaletteLibrary {
    palettes: Vec<Palette>,
    tool_palette: Option<String>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl PaletteLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, palette) in self.palettes.iter().enumerate() {
            self.index.entry(palette.name.clone()).or_insert(i);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.index.get(name).map(|&i| &self.palettes[i])
    }

    /// Returns the palette called `name`, creating an empty one if needed.
    pub fn get_or_create(&mut self, name: &str) -> &mut Palette {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                tracing::debug!("Creating palette {name:?}");
                self.palettes.push(Palette::new(name));
                let i = self.palettes.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.palettes[i]
    }

    /// Name of the palette in the tool slot.
    pub fn tool_palette(&self) -> Option<&str> {
        self.tool_palette.as_deref()
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

#[derive(Deserialize)]
struct LibraryData {
    #[serde(default)]
    palettes: Vec<Palette>,
    #[serde(default)]
    tool_palette: Option<String>,
}

impl From<LibraryData> for PaletteLibrary {
    fn from(data: LibraryData) -> Self {
        let mut library = PaletteLibrary {
            palettes: data.palettes,
            tool_palette: data.tool_palette,
            index: FxHashMap::default(),
        };
        library.reindex();
        library
    }
}

impl PartialEq for PaletteLibrary {
    fn eq(&self, other: &Self) -> bool {
        self.palettes == other.palettes && self.tool_palette == other.tool_palette
    }
}

impl PaletteStore for PaletteLibrary {
    fn palette_mut(&mut self, key: &PaletteKey) -> &mut Palette {
        match key {
            PaletteKey::Named(name) => self.get_or_create(name),
            PaletteKey::ToolSlot => {
                let name = self
                    .tool_palette
                    .get_or_insert_with(|| DEFAULT_PALETTE_NAME.to_string())
                    .clone();
                self.get_or_create(&name)
            }
        }
    }

    fn assign_tool_palette(&mut self, name: &str) {
        self.get_or_create(name);
        self.tool_palette = Some(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_same_color_twice_keeps_one() {
        let mut palette = Palette::new("test");
        assert!(palette.add(Srgb::rgb(0.5, 0.25, 1.0)));
        assert!(!palette.add(Srgb::rgb(0.5, 0.25, 1.0)));
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn test_colors_differing_in_one_channel_are_distinct() {
        let mut palette = Palette::new("test");
        palette.add(Srgb::rgb(0.5, 0.5, 0.5));
        palette.add(Srgb::rgb(0.5, 0.5, 0.5 + 1e-6));
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut palette = Palette::new("test");
        let colors = [
            Srgb::rgb(1.0, 0.0, 0.0),
            Srgb::rgb(0.0, 1.0, 0.0),
            Srgb::rgb(1.0, 0.0, 0.0),
            Srgb::rgb(0.0, 0.0, 1.0),
        ];
        for c in colors {
            palette.add(c);
        }
        assert_eq!(
            palette.colors(),
            &[colors[0], colors[1], colors[3]],
            "first occurrence wins"
        );
    }

    #[test]
    fn test_get_or_create_is_lazy_and_stable() {
        let mut library = PaletteLibrary::new();
        assert!(library.get("Cube").is_none());
        library.get_or_create("Cube").add(Srgb::rgb(0.1, 0.2, 0.3));
        library.get_or_create("Sphere");
        assert_eq!(library.len(), 2);
        assert_eq!(library.get_or_create("Cube").len(), 1);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_empty_tool_slot_gets_default_palette() {
        let mut library = PaletteLibrary::new();
        assert_eq!(library.tool_palette(), None);
        let palette = library.palette_mut(&PaletteKey::ToolSlot);
        assert_eq!(palette.name, DEFAULT_PALETTE_NAME);
        assert_eq!(library.tool_palette(), Some(DEFAULT_PALETTE_NAME));
    }

    #[test]
    fn test_assigned_tool_palette_is_used() {
        let mut library = PaletteLibrary::new();
        library.assign_tool_palette("Suzanne");
        library
            .palette_mut(&PaletteKey::ToolSlot)
            .add(Srgb::rgb(1.0, 1.0, 0.0));
        assert_eq!(library.get("Suzanne").map(Palette::len), Some(1));
        assert!(library.get(DEFAULT_PALETTE_NAME).is_none());
    }

    #[test]
    fn test_deserialized_library_finds_existing_palettes() {
        let mut library = PaletteLibrary::new();
        library.assign_tool_palette("Cube");
        library.get_or_create("Cube").add(Srgb::rgb(0.2, 0.4, 0.6));

        let text = ron::to_string(&library).unwrap();
        let mut back: PaletteLibrary = ron::from_str(&text).unwrap();
        assert_eq!(back.get("Cube").map(Palette::len), Some(1));
        assert_eq!(back.tool_palette(), Some("Cube"));

        back.palette_mut(&PaletteKey::Named("Cube".to_string()))
            .add(Srgb::rgb(0.9, 0.9, 0.9));
        assert_eq!(back.len(), 1);
        assert_eq!(back.get("Cube").map(Palette::len), Some(2));
    }

    #[test]
    fn test_deserialized_palette_drops_repeated_colors() {
        let text = r#"(name: "A", colors: [(0.5, 0.5, 0.5), (0.1, 0.2, 0.3), (0.5, 0.5, 0.5)])"#;
        let palette: Palette = ron::from_str(text).unwrap();
        assert_eq!(
            palette.colors(),
            &[Srgb::rgb(0.5, 0.5, 0.5), Srgb::rgb(0.1, 0.2, 0.3)]
        );
    }
}
