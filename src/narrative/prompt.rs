/// Instructions placed before the analysis report.
///
/// Fixed text apart from the drug name in the lead-in sentence. The emphasis
/// names no drug-specific reactions, so the same preamble fits any drug.
const INSIGHT_INSTRUCTIONS: &str = "generate a detailed medical insight. The analysis includes reactions, outcomes, and risk factors. \
Focus on providing a structured, clinically relevant interpretation of the data with emphasis on the most frequent adverse \
reactions and any serious outcomes such as death or hospitalization. \
Offer insights on potential risks, possible drug interactions, and healthcare recommendations for elderly patients. \
Make sure the response is practical and actionable for healthcare providers to assess and manage patient safety. \
Do not just repeat the data, but offer a thoughtful assessment of its significance and potential clinical implications. ";

/// Build the narrative prompt. The report is embedded verbatim after the
/// `Analysis:` marker.
pub fn build_insight_prompt(drug_name: &str, report: &str) -> String {
    let mut prompt = format!(
        "Given the following analysis of drug reactions for elderly patients taking {drug_name}, "
    );
    prompt.push_str(INSIGHT_INSTRUCTIONS);
    prompt.push_str("\n\nAnalysis:\n");
    prompt.push_str(report);
    prompt
}
