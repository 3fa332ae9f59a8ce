use serde::Serialize;

pub const AGENT_NAME: &str = "boutique_complete_agent";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const DESCRIPTION: &str = "You are a full-service shopping agent for the 'Online Boutique'. You can \
help users discover, learn about, and purchase products.";

const INSTRUCTION_STEPS: [&str; 7] = [
    "Start by helping the user find products using `list_all_products` and `get_product_details`.",
    "Elaborate creatively on product details to help the user visualize owning the item.",
    "If the user expresses clear intent to buy a product (e.g., 'I want to buy the watch', \
     'let's purchase it'), you must shift into the checkout workflow.",
    "**Checkout Workflow:** First, you MUST inform the user that you need their details to \
     proceed. Ask them to provide their email, full shipping address, and credit card \
     information.",
    "**Wait** for the user to provide all the necessary details.",
    "Once you have all the information, you MUST use the `place_order` tool to complete the \
     purchase.",
    "After the tool call is successful, confirm the purchase with the user by providing the \
     `order_confirmation_id` and the `shipping_tracking_id` from the tool's response. Be \
     celebratory and thank them for their order.",
];

/// What the external conversational runtime needs to host the shopping agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentDefinition {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
}

impl AgentDefinition {
    pub fn boutique(model: impl Into<String>) -> Self {
        Self {
            name: AGENT_NAME.to_string(),
            model: model.into(),
            description: DESCRIPTION.to_string(),
            instruction: instruction(),
        }
    }
}

impl Default for AgentDefinition {
    fn default() -> Self {
        Self::boutique(DEFAULT_MODEL)
    }
}

fn instruction() -> String {
    INSTRUCTION_STEPS
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}. {step}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
