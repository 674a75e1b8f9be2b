// All LLM prompt text for the Recommendations module.

/// System prompt sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are an expert IT infrastructure and compliance consultant \
    who specializes in helping organizations implement secure, compliant environments. \
    Your role is to provide specific, actionable recommendations for configuring customer \
    environments and infrastructure - never suggest document changes. \
    Focus on real-world implementation steps for IT teams.";

/// Renders the user prompt for one recommendations request.
///
/// Pure string construction: identical inputs yield a byte-identical prompt,
/// and the three values are included verbatim. `format!` interpolation keeps
/// braces inside the document content literal, so input cannot alter the
/// template.
pub fn render_prompt(industry: &str, region: &str, file_content: &str) -> String {
    format!(
        "Based on this project document from {industry} industry in {region}, analyze the project requirements and identify specific compliance gaps, then provide structured Microsoft 365 tenant recommendations.

Focus ONLY on actions that can be performed within Microsoft 365 tenant - creating policies, changing settings, configuring compliance features, etc.

STRUCTURE YOUR RESPONSE EXACTLY AS FOLLOWS:

For each compliance issue found, provide:

**GAP:** [Brief title of the compliance gap]
**DESCRIPTION:** [Detailed explanation of what is missing or inadequate]
**RECOMMENDATION:** [What needs to be implemented to address this gap]
**ACTION:** [Specific steps to take in Microsoft 365]
**CONFIGURATION:** [Exact settings, values, and parameters to configure]

Focus on M365 services such as:
- Azure AD Conditional Access policies
- Microsoft Purview data classification and retention policies
- Microsoft Defender security settings
- Compliance Manager assessments
- Data Loss Prevention (DLP) policies
- Information Protection sensitivity labels
- Exchange Online protection settings
- SharePoint and OneDrive compliance configurations
- Teams security settings
- Multi-factor authentication policies

Based on {industry} industry standards and {region} regulatory requirements.

IGNORE: Infrastructure, on-premises systems, third-party tools, hardware configurations, or anything outside Microsoft 365 tenant.

Document Content:
{file_content}

Provide 2-4 structured recommendations that can be implemented immediately through M365 admin portals."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_inputs_verbatim() {
        let document = "Lines of project text.\nWith a second line kept intact.";
        let prompt = render_prompt("Healthcare", "European Union", document);
        assert!(prompt.contains("from Healthcare industry in European Union"));
        assert!(prompt.contains("Based on Healthcare industry standards and European Union regulatory requirements"));
        assert!(prompt.contains(document));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = render_prompt("Finance", "Germany", "Some document content here.");
        let b = render_prompt("Finance", "Germany", "Some document content here.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_keeps_fixed_scaffolding() {
        let prompt = render_prompt("Finance", "Germany", "Some document content here.");
        for marker in [
            "**GAP:**",
            "**DESCRIPTION:**",
            "**RECOMMENDATION:**",
            "**ACTION:**",
            "**CONFIGURATION:**",
        ] {
            assert!(prompt.contains(marker), "missing {marker}");
        }
        assert!(prompt.contains("IGNORE: Infrastructure"));
        assert!(prompt.contains("Provide 2-4 structured recommendations"));
    }

    #[test]
    fn test_document_braces_stay_literal() {
        let document = "Policy placeholder {region} must survive as-is.";
        let prompt = render_prompt("Retail", "Canada", document);
        assert!(prompt.contains("{region} must survive as-is"));
    }

    #[test]
    fn test_document_is_not_truncated() {
        let document = "x".repeat(50_000);
        let prompt = render_prompt("Retail", "Canada", &document);
        assert!(prompt.contains(&document));
    }
}
