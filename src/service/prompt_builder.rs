use crate::models::CaseFields;

/// General queries are forwarded exactly as typed.
pub fn build_general_prompt(prompt: &str) -> String {
    prompt.to_string()
}

/// Renders the case analysis template. Field values are embedded verbatim,
/// and the layout (leading newline, four-space indent, trailing two spaces)
/// is part of the output.
pub fn build_case_analysis_prompt(fields: &CaseFields) -> String {
    format!(
        "\n    Analyze the following drug case information:\n    \
         Location: {location}\n    \
         Substances involved: {substances}\n    \
         Quantity: {quantity}\n    \
         Suspects: {suspects}\n    \
         \n    \
         Provide insights on:\n    \
         1. Potential trafficking routes based on the location\n    \
         2. Associated crime networks\n    \
         3. Recommended surveillance approach\n    \
         4. Risk assessment\n  ",
        location = fields.location,
        substances = fields.substances,
        quantity = fields.quantity,
        suspects = fields.suspects,
    )
}
