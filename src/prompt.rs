use crate::request::StrategyRequest;

/// Build the strategy prompt sent to the model.
///
/// The output format section only asks for markdown the parser understands:
/// `#`-`###` headings, `-` and numbered list items, pipe tables and `**bold**`.
pub fn build_prompt(request: &StrategyRequest) -> String {
    let StrategyRequest {
        company_name,
        website_url,
        industry,
        target_markets,
        products_services,
        business_goals,
        target_audience,
        current_seo_performance,
        competitors,
        content_strategy,
    } = request;

    format!(
        r#"### ROLE
You are a Senior SEO Strategist and Keyword Research Specialist with 10+ years of experience. Your goal is to conduct thorough keyword research and develop an actionable SEO strategy.

### RULES
- You MUST research actual search volumes and keyword difficulty when possible. Use realistic, illustrative data if direct access is not available.
- You MUST analyze search intent behind each keyword recommendation.
- You MUST consider user journey stages in keyword selection.
- You MUST provide implementation guidance and content recommendations.
- You MUST include competitor keyword analysis.
- Structure your entire output in Markdown format. Use tables, headings, bold text, and lists as specified in the OUTPUT FORMAT section. Do not deviate from this format.

### CONTEXT PROVIDED
<business_information>
- Company name: {company_name}
- Website URL: {website_url}
- Industry and primary business focus: {industry}
- Target geographic markets: {target_markets}
- Primary products/services offered: {products_services}
- Main business goals and conversion objectives: {business_goals}
- Target audience and customer personas: {target_audience}
</business_information>

<current_seo_status>
- Current SEO performance and rankings: {current_seo_performance}
- Competitor websites to analyze: {competitors}
- Current content strategy and blog topics: {content_strategy}
</current_seo_status>

### OUTPUT FORMAT
Generate a comprehensive SEO Keyword Strategy based on the provided context. Follow this markdown structure exactly:

# SEO KEYWORD STRATEGY: {company_name}

## SEO KEYWORD STRATEGY OVERVIEW
- **Primary Focus Areas:** [3-5 main keyword themes]
- **Target Audience Search Behavior:** [Key insights about how customers search]
- **Competitive Landscape:** [Overview of SEO competition and opportunities]
- **Success Metrics:** [KPIs to measure SEO progress]

## PRIMARY KEYWORD TARGETS
High-impact keywords for immediate focus:

| Keyword | Search Volume | Difficulty | Search Intent | Current Rank | Opportunity Score | Priority |
|---------|---------------|------------|---------------|--------------|-------------------|----------|
| [Keyword 1] | [Volume] | [Difficulty] | [Intent] | [Rank] | [Score] | High |
| [Keyword 2] | [Volume] | [Difficulty] | [Intent] | [Rank] | [Score] | High |
| [Keyword 3] | [Volume] | [Difficulty] | [Intent] | [Rank] | [Score] | Medium |

## KEYWORD TOPIC CLUSTERS
Organized by content themes and user intent:

### Cluster 1: [Topic Theme]
- **Pillar Content Keyword:** [Main topic keyword]
- **Supporting Keywords:** [5-10 related keywords, comma-separated]
- **Content Format:** [Blog post, guide, tool, etc.]
- **Search Intent:** [Informational/Commercial/Transactional]
- **Content Brief:** [What the content should cover]

### Cluster 2: [Topic Theme]
- **Pillar Content Keyword:** [Main topic keyword]
- **Supporting Keywords:** [5-10 related keywords, comma-separated]
- **Content Format:** [Blog post, guide, tool, etc.]
- **Search Intent:** [Informational/Commercial/Transactional]
- **Content Brief:** [What the content should cover]

## LONG-TAIL KEYWORD OPPORTUNITIES
Specific, conversion-focused keywords:

| Long-Tail Keyword | Search Volume | Competition | Conversion Potential | Content Type |
|-------------------|---------------|-------------|---------------------|--------------|
| [Specific phrase] | [Volume] | [Low/Med/High] | [High/Med/Low] | [Content type] |
| [Specific phrase] | [Volume] | [Low/Med/High] | [High/Med/Low] | [Content type] |

## COMPETITOR KEYWORD ANALYSIS
### Competitor 1: [Name from context]
- **Top ranking keywords they dominate:** [List of keywords]
- **Keyword gaps where you can compete:** [List of keywords]
- **Content strategy insights:** [Analysis]

## CONTENT OPTIMIZATION ROADMAP
### Phase 1: Quick Wins (Month 1)
- **Existing Content Optimization:**
  - [Page 1 URL/Title] to optimize with [keywords]
  - [Page 2 URL/Title] to optimize with [keywords]
- **Technical Fixes:** Title tag and meta description improvements, internal linking enhancements.

### Phase 2: New Content Creation (Months 2-4)
- **Priority Content Pieces:**
  1. **Title:** [Content title] - **Target:** [primary keyword] - **Timeline:** [date]
  2. **Title:** [Content title] - **Target:** [primary keyword] - **Timeline:** [date]

## TECHNICAL SEO RECOMMENDATIONS
- **Site Structure:** [URL structure and navigation improvements]
- **Page Speed:** [Performance optimization priorities]
- **Schema Markup:** [Structured data opportunities]

## MEASUREMENT AND TRACKING PLAN
- **Ranking Tracking:** [Keywords to monitor weekly/monthly]
- **Traffic Goals:** [Organic traffic growth targets]
- **Conversion Tracking:** [How SEO traffic converts]
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::request::FIELDS;

    fn request() -> StrategyRequest {
        StrategyRequest {
            company_name: "Acme Widgets".to_string(),
            website_url: "https://acme.example".to_string(),
            industry: "Industrial widgets".to_string(),
            target_markets: "Germany, Austria".to_string(),
            products_services: "Custom widgets".to_string(),
            business_goals: "More B2B leads".to_string(),
            target_audience: "Procurement managers".to_string(),
            current_seo_performance: "Page two for 'widgets'".to_string(),
            competitors: "widgetco.example".to_string(),
            content_strategy: "None yet".to_string(),
        }
    }

    #[test]
    fn every_field_is_interpolated() {
        let request = request();
        let prompt = build_prompt(&request);
        for value in request.values() {
            assert!(prompt.contains(value), "prompt is missing {value:?}");
        }
        assert_eq!(request.values().len(), FIELDS.len());
    }

    #[test]
    fn report_title_names_the_company() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("\n# SEO KEYWORD STRATEGY: Acme Widgets\n"));
    }

    #[test]
    fn context_sections_are_present() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("- Company name: Acme Widgets\n"));
        assert!(prompt.contains("- Competitor websites to analyze: widgetco.example\n"));
        assert!(prompt.contains("<business_information>"));
        assert!(prompt.contains("</current_seo_status>"));
    }

    #[test]
    fn requested_format_is_parseable() {
        let blocks = crate::parse(&build_prompt(&request()));
        let tables = blocks
            .iter()
            .filter(|b| matches!(b, Block::Table { .. }))
            .count();
        assert_eq!(tables, 2);
        assert!(blocks.contains(&Block::Heading {
            level: 1,
            text: "SEO KEYWORD STRATEGY: Acme Widgets".to_string(),
        }));
    }
}
