//! Variant templates used to derive suggestions from a seed keyword

/// A fixed prefix/suffix pattern wrapped around a seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantTemplate {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl VariantTemplate {
    const fn suffix(suffix: &'static str) -> Self {
        Self { prefix: "", suffix }
    }

    const fn prefix(prefix: &'static str) -> Self {
        Self { prefix, suffix: "" }
    }

    /// Apply the template to a seed
    pub fn apply(&self, seed: &str) -> String {
        let capacity = self.prefix.len() + seed.len() + self.suffix.len() + 2;
        let mut phrase = String::with_capacity(capacity);
        if !self.prefix.is_empty() {
            phrase.push_str(self.prefix);
            phrase.push(' ');
        }
        phrase.push_str(seed);
        if !self.suffix.is_empty() {
            phrase.push(' ');
            phrase.push_str(self.suffix);
        }
        phrase
    }
}

/// Template catalogue; order determines output order within a seed
pub const VARIANT_TEMPLATES: [VariantTemplate; 8] = [
    VariantTemplate::suffix("купить"),
    VariantTemplate::suffix("цена"),
    VariantTemplate::suffix("отзывы"),
    VariantTemplate::suffix("онлайн"),
    VariantTemplate::prefix("лучший"),
    VariantTemplate::suffix("2025"),
    VariantTemplate::prefix("как выбрать"),
    VariantTemplate::suffix("бесплатно"),
];

/// Number of variants emitted per seed
pub const VARIANTS_PER_SEED: usize = VARIANT_TEMPLATES.len();

/// Expand a seed into its variant phrases, in catalogue order
pub fn expand_seed(seed: &str) -> impl Iterator<Item = String> + '_ {
    VARIANT_TEMPLATES.iter().map(move |template| template.apply(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_seed_order() {
        let variants: Vec<String> = expand_seed("телефон").collect();

        assert_eq!(
            variants,
            vec![
                "телефон купить",
                "телефон цена",
                "телефон отзывы",
                "телефон онлайн",
                "лучший телефон",
                "телефон 2025",
                "как выбрать телефон",
                "телефон бесплатно",
            ]
        );
    }

    #[test]
    fn test_every_variant_contains_seed() {
        assert_eq!(VARIANTS_PER_SEED, 8);
        assert!(expand_seed("shoes").all(|v| v.contains("shoes")));
    }
}
