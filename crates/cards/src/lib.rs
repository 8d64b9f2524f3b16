pub mod adaptive;
pub mod render;

pub use adaptive::{
    AdaptiveCard, CardAction, CardBuilder, CardElement, Fact, Spacing, TextColor, TextSize,
    TextWeight,
};
pub use render::ResponsePayload;
