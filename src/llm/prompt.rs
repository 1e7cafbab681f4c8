//! Review prompt template.

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert Python code reviewer providing detailed analysis in Markdown format.";

/// Section headings the model is asked to produce, in order.
pub const SECTION_HEADINGS: [&str; 5] = [
    "### Summary",
    "### Logic Explanation",
    "### Refactoring Suggestions",
    "### Potential Bugs",
    "### Generated Docstring",
];

const TEMPLATE_HEAD: &str = r#"You are an expert Python code reviewer. Analyze the following code snippet.
Provide a detailed analysis in the following Markdown format:

### Summary
A brief, one-sentence summary of what this code does.

### Logic Explanation
A step-by-step explanation of the code's logic. Use a numbered list.

### Refactoring Suggestions
Suggest improvements for clarity, efficiency, and Pythonic style (e.g., better variable names, simpler logic). If none, state "No major suggestions.".

### Potential Bugs
Identify any potential bugs, edge cases not handled, or logical errors. If none, state "No obvious bugs found.".

### Generated Docstring
Create a professional, Google-style Python docstring for the function or class.

--- Code to Analyze ---
```python
"#;

const TEMPLATE_TAIL: &str = "\n```\n";

/// A system instruction plus the user message for one snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
}

impl Prompt {
    /// Substitute a snippet into the review template.
    pub fn for_snippet(snippet: &str) -> Self {
        let mut user =
            String::with_capacity(TEMPLATE_HEAD.len() + snippet.len() + TEMPLATE_TAIL.len());
        user.push_str(TEMPLATE_HEAD);
        user.push_str(snippet);
        user.push_str(TEMPLATE_TAIL);

        Self {
            system: SYSTEM_INSTRUCTION,
            user,
        }
    }
}
