//! Prompt construction for the two generation-service calls.
//!
//! The contracts are fixed: three workload categories, JSON replies in the
//! exact shapes `types` deserializes, at most four recommendations.

/// System role shared by both calls.
pub(crate) const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that recommends courses for a university.";

/// Prompt for the intent-extraction call: workload category plus extracted
/// and suggested interest keywords.
pub(crate) fn intent_prompt(user_input: &str) -> String {
    format!(
        r#"You are a course recommendation system for a university. You have access to a database of courses with their descriptions and credit hours.
For this task, you will only determine the workload the user prefers based on their input.

When determining the workload there are exactly 3 categories:
- Low
- Standard
- High

Do not assume other workload categories exist.
The user's input is as follows:
{user_input}

Additionally, extract relevant keywords from the input and suggest additional keywords that reflect the user's interests.
For example, for "Oscars and film studies":
extracted relevant keywords are: film
suggested keywords are: acting, theatre, performing arts, etc.

For example, for "Interstellar travel":
extracted and suggested keywords are: rockets, travelling, space, astronomy, etc.

Return the result in JSON format with the following fields (use the following as a template):
{{
    "category": "Low" | "Standard" | "High",
    "reasoning": "Explanation of why this workload category was chosen based on the user's input.",
    "interest_key_words": ["film", "acting", "theatre", "performing arts"]
}}
"#
    )
}

/// Prompt for the explanation call: per-course reasoning over an already
/// ranked candidate list.
pub(crate) fn explanation_prompt(candidates_json: &str, user_input: &str) -> String {
    format!(
        r#"You are a course recommendation system for a university. You have access to a database of courses with their descriptions and credit hours.
You have already recommended the following courses based on the user's input:
{candidates_json}

Now, provide a brief reasoning for why each course was recommended based on the user's input below:
{user_input}

Return the result in JSON format as a list of objects with the following fields:
{{
    "key": "Course ID",
    "title": "Course Title",
    "description": "Course Description",
    "minimum_credits": minimum credits as a number,
    "similarity": similarity score as a float with 2 decimal places,
    "reasoning": "Explanation of why this course was recommended based on the user's input."
}}

Make a limit of 4 recommendations only in your result.
If you notice a long course description, summarize it.

Ensure it is a valid JSON string.
"#
    )
}
