//! Static program content - the 21-day plan, the recipe catalog and the guide.
//!
//! These types are read-only reference data. They are deserialized from the
//! content catalog (see [`crate::config::content`]) and never persisted.

use serde::{Deserialize, Serialize};

/// Number of days in the program.
pub const PLAN_LENGTH: u32 = 21;

/// The three phases of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Days 1-7
    Adaptation,
    /// Days 8-14
    Consolidation,
    /// Days 15-21
    Optimization,
}

impl Phase {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Adaptation => "Adaptação",
            Self::Consolidation => "Consolidação",
            Self::Optimization => "Otimização",
        }
    }
}

/// Known icon identifiers, resolved to glyphs by the presentation layer.
///
/// The catalog names them in `snake_case` (`thermometer_sun`, `list_checks`).
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanIcon {
    Flame,
    Utensils,
    Droplet,
    ThermometerSun,
    Zap,
    Activity,
    Award,
    BrainCircuit,
    Beaker,
    Moon,
    Battery,
    Scale,
    ShieldAlert,
    TrendingUp,
    ListChecks,
    CalendarCheck,
}

/// Suggested meals for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    /// Café da manhã
    pub breakfast: String,
    /// Almoço
    pub lunch: String,
    /// Jantar
    pub dinner: String,
}

/// Guidance for a single plan day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGuidance {
    /// Day number, 1-based
    pub day: u32,
    /// Phase the day belongs to
    pub phase: Phase,
    /// Short headline for the day
    pub title: String,
    /// What to do today
    pub action: String,
    /// Why it matters
    pub why: String,
    /// Suggested meals
    pub meal_plan: MealPlan,
    /// Suggested exercise
    pub exercise: String,
    /// Icon shown next to the day
    pub icon: PlanIcon,
}

/// Meal slot a recipe belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    /// Café da manhã
    Breakfast,
    /// Almoço
    Lunch,
    /// Lanche
    Snack,
    /// Jantar
    Dinner,
}

impl RecipeCategory {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Café da Manhã",
            Self::Lunch => "Almoço",
            Self::Snack => "Lanche",
            Self::Dinner => "Jantar",
        }
    }
}

/// A recipe whose ingredients can be sent to the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Catalog-unique id, used by `shop add-recipe`
    pub id: u32,
    /// Recipe name
    pub title: String,
    /// Meal slot
    pub category: RecipeCategory,
    /// Free-form preparation time, e.g. "10 min"
    pub prep_time: String,
    /// Ingredients, one shopping-list item each
    pub ingredients: Vec<String>,
    /// Optional variations on the base recipe
    #[serde(default)]
    pub variations: Vec<String>,
    /// Free-form labels
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A low-carb swap for a common food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Food to avoid
    pub original: String,
    /// What to eat instead
    pub substitute: String,
}

/// One section of the educational guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSection {
    /// Catalog-unique id, used to open the section from the command line
    pub id: String,
    /// Section heading
    pub title: String,
    /// Icon shown next to the heading
    pub icon: PlanIcon,
    /// Section text, already laid out with line breaks
    pub body: String,
}

/// The validated plan, recipes, substitutions and guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCatalog {
    /// Exactly [`PLAN_LENGTH`] days, in order
    pub days: Vec<DailyGuidance>,
    /// Recipe catalog
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Substitution table
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    /// Guide sections, in reading order
    #[serde(default)]
    pub guide: Vec<GuideSection>,
}

impl ContentCatalog {
    /// Guidance for `day`, if it is part of the plan.
    #[must_use]
    pub fn day(&self, day: u32) -> Option<&DailyGuidance> {
        self.days.iter().find(|guidance| guidance.day == day)
    }

    /// Whether `day` belongs to the plan.
    #[must_use]
    pub fn contains_day(&self, day: u32) -> bool {
        self.day(day).is_some()
    }

    /// Plan day numbers in plan order.
    pub fn day_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().map(|guidance| guidance.day)
    }

    /// Last day of the plan.
    #[must_use]
    pub fn last_day(&self) -> u32 {
        self.days.last().map_or(PLAN_LENGTH, |guidance| guidance.day)
    }

    /// Looks up a recipe by id.
    #[must_use]
    pub fn recipe(&self, id: u32) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Recipes in `category`, or every recipe when `category` is `None`.
    #[must_use]
    pub fn recipes_in(&self, category: Option<RecipeCategory>) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| category.is_none_or(|c| recipe.category == c))
            .collect()
    }

    /// Looks up a guide section by id, ignoring case.
    #[must_use]
    pub fn guide_section(&self, id: &str) -> Option<&GuideSection> {
        let id = id.trim();
        self.guide
            .iter()
            .find(|section| section.id.eq_ignore_ascii_case(id))
    }
}
