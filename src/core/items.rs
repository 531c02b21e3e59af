//! Carousel content — the two built-in item sets and the types describing
//! each item.

use std::fmt;
use std::str::FromStr;

use super::carousel::CarouselError;
use super::mesh::ModelShape;

/// Which item set is on the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Info,
    Action,
}

impl Category {
    pub fn toggled(self) -> Self {
        match self {
            Category::Info => Category::Action,
            Category::Action => Category::Info,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Info => "Info",
            Category::Action => "Action",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Category::Info),
            "action" => Ok(Category::Action),
            _ => Err(CarouselError::UnknownCategory(s.to_string())),
        }
    }
}

/// One carousel entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: &'static str,
    pub shape: ModelShape,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub cta: &'static str,
}

/// Ordered, non-empty list of items.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSet {
    name: String,
    items: Vec<Item>,
}

impl ItemSet {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Result<Self, CarouselError> {
        let name = name.into();
        if items.is_empty() {
            return Err(CarouselError::EmptyItemSet(name));
        }
        Ok(Self { name, items })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// Both item sets, addressable by category.
#[derive(Debug, Clone)]
pub struct Catalog {
    info: ItemSet,
    action: ItemSet,
}

impl Catalog {
    pub fn new(info: ItemSet, action: ItemSet) -> Self {
        Self { info, action }
    }

    pub fn set(&self, category: Category) -> &ItemSet {
        match category {
            Category::Info => &self.info,
            Category::Action => &self.action,
        }
    }

    /// The shipped content: four info models, three action models.
    pub fn builtin() -> Result<Self, CarouselError> {
        let info = ItemSet::new(
            Category::Info.label(),
            vec![
                Item {
                    id: "core",
                    shape: ModelShape::Cube,
                    title: "Core",
                    description: "The foundation block. Every scene starts from a solid, \
                                  predictable unit that stacks, scales and snaps.",
                    features: &["Six equal faces", "Grid-aligned edges", "Stacks without gaps"],
                    cta: "Learn more",
                },
                Item {
                    id: "summit",
                    shape: ModelShape::Pyramid,
                    title: "Summit",
                    description: "A square base rising to a single point. Reads clearly \
                                  from any side of the ring.",
                    features: &["Square footprint", "Single apex", "Strong silhouette"],
                    cta: "Learn more",
                },
                Item {
                    id: "gem",
                    shape: ModelShape::Octahedron,
                    title: "Gem",
                    description: "Eight triangular faces meeting at six vertices. \
                                  Catches the eye when it spins.",
                    features: &[],
                    cta: "Learn more",
                },
                Item {
                    id: "beam",
                    shape: ModelShape::Prism,
                    title: "Beam",
                    description: "A triangular prism. Long, light and directional.",
                    features: &["Three rectangular sides", "Two triangular caps"],
                    cta: "Learn more",
                },
            ],
        )?;
        let action = ItemSet::new(
            Category::Action.label(),
            vec![
                Item {
                    id: "launch",
                    shape: ModelShape::Diamond,
                    title: "Launch",
                    description: "Start a new scene from the diamond template.",
                    features: &["Empty stage", "Default lighting", "Camera on the ring"],
                    cta: "Launch",
                },
                Item {
                    id: "explore",
                    shape: ModelShape::Octahedron,
                    title: "Explore",
                    description: "Browse the model library and preview shapes in place.",
                    features: &["Live preview", "Spin to inspect"],
                    cta: "Explore",
                },
                Item {
                    id: "share",
                    shape: ModelShape::Cube,
                    title: "Share",
                    description: "Package the current carousel and hand it to someone else.",
                    features: &[],
                    cta: "Share",
                },
            ],
        )?;
        Ok(Self::new(info, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_sizes() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.set(Category::Info).len(), 4);
        assert_eq!(catalog.set(Category::Action).len(), 3);
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = ItemSet::new("nothing", Vec::new()).unwrap_err();
        assert_eq!(err, CarouselError::EmptyItemSet("nothing".into()));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("INFO".parse::<Category>().unwrap(), Category::Info);
        assert_eq!(" action ".parse::<Category>().unwrap(), Category::Action);
        assert!("settings".parse::<Category>().is_err());
        assert_eq!(Category::Info.toggled(), Category::Action);
        assert_eq!(Category::Action.toggled(), Category::Info);
    }
}
