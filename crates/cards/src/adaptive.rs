use serde::Serialize;

/// Typed Adaptive Card 1.5 display tree: text blocks, fact lists, and
/// action links. Serialize-only; the chat surface renders the JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TextSize {
    Small,
    Default,
    Medium,
    Large,
    ExtraLarge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TextWeight {
    Lighter,
    Default,
    Bolder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TextColor {
    Default,
    Accent,
    Good,
    Warning,
    Attention,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Spacing {
    Small,
    Default,
    Medium,
    Large,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CardElement {
    TextBlock {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<TextSize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        weight: Option<TextWeight>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<TextColor>,
        #[serde(skip_serializing_if = "Option::is_none")]
        spacing: Option<Spacing>,
    },
    FactSet {
        facts: Vec<Fact>,
        #[serde(skip_serializing_if = "Option::is_none")]
        spacing: Option<Spacing>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CardAction {
    #[serde(rename = "Action.OpenUrl")]
    OpenUrl { title: String, url: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdaptiveCard {
    #[serde(rename = "type")]
    pub card_type: &'static str,
    pub version: &'static str,
    pub body: Vec<CardElement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<CardAction>,
}

pub struct CardBuilder {
    body: Vec<CardElement>,
    actions: Vec<CardAction>,
}

impl CardBuilder {
    pub fn new() -> Self {
        Self { body: Vec::new(), actions: Vec::new() }
    }

    pub fn text_block<F>(mut self, build: F) -> Self
    where
        F: FnOnce(&mut TextBlockBuilder),
    {
        let mut builder = TextBlockBuilder::default();
        build(&mut builder);
        self.body.push(builder.build());
        self
    }

    pub fn fact_set<F>(mut self, build: F) -> Self
    where
        F: FnOnce(&mut FactSetBuilder),
    {
        let mut builder = FactSetBuilder::default();
        build(&mut builder);
        self.body.push(builder.build());
        self
    }

    pub fn open_url(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.actions.push(CardAction::OpenUrl { title: title.into(), url: url.into() });
        self
    }

    pub fn build(self) -> AdaptiveCard {
        AdaptiveCard {
            card_type: "AdaptiveCard",
            version: "1.5",
            body: self.body,
            actions: self.actions,
        }
    }
}

impl Default for CardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct TextBlockBuilder {
    text: String,
    size: Option<TextSize>,
    weight: Option<TextWeight>,
    color: Option<TextColor>,
    spacing: Option<Spacing>,
}

impl TextBlockBuilder {
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn size(&mut self, size: TextSize) -> &mut Self {
        self.size = Some(size);
        self
    }

    pub fn weight(&mut self, weight: TextWeight) -> &mut Self {
        self.weight = Some(weight);
        self
    }

    pub fn color(&mut self, color: TextColor) -> &mut Self {
        self.color = Some(color);
        self
    }

    pub fn spacing(&mut self, spacing: Spacing) -> &mut Self {
        self.spacing = Some(spacing);
        self
    }

    fn build(self) -> CardElement {
        CardElement::TextBlock {
            text: self.text,
            size: self.size,
            weight: self.weight,
            color: self.color,
            spacing: self.spacing,
        }
    }
}

#[derive(Default)]
pub struct FactSetBuilder {
    facts: Vec<Fact>,
    spacing: Option<Spacing>,
}

impl FactSetBuilder {
    pub fn fact(&mut self, title: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.facts.push(Fact { title: title.into(), value: value.into() });
        self
    }

    pub fn spacing(&mut self, spacing: Spacing) -> &mut Self {
        self.spacing = Some(spacing);
        self
    }

    fn build(self) -> CardElement {
        CardElement::FactSet { facts: self.facts, spacing: self.spacing }
    }
}
