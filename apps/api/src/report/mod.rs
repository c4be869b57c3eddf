//! Result renderer: turns an `AnalysisResult` into the report shown under
//! "Analysis Results". Pure: no I/O, no state.
//!
//! Headline and bars share one threshold rule on a 0-100 scale:
//! ≥ 70 strong (green), ≥ 40 moderate (amber), anything else weak (red).
//! Missing scores render blank and fall into the weak tier.

use crate::models::analysis::AnalysisResult;

/// Every sub-score is rated out of 10.
pub const SUB_SCORE_MAX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Strong,
    Moderate,
    Weak,
}

impl ScoreTier {
    /// Tier for a 0-100 percentage.
    pub fn for_percentage(percentage: Option<f64>) -> Self {
        match percentage {
            Some(p) if p >= 70.0 => ScoreTier::Strong,
            Some(p) if p >= 40.0 => ScoreTier::Moderate,
            _ => ScoreTier::Weak,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreTier::Strong => "#10B981",
            ScoreTier::Moderate => "#F59E0B",
            ScoreTier::Weak => "#EF4444",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreTier::Strong => "tier-strong",
            ScoreTier::Moderate => "tier-moderate",
            ScoreTier::Weak => "tier-weak",
        }
    }

    /// Sentence shown next to the headline match score.
    pub fn verdict(self) -> &'static str {
        match self {
            ScoreTier::Strong => {
                "Excellent match! Your resume strongly aligns with the job description."
            }
            ScoreTier::Moderate => "Good potential. Consider some improvements.",
            ScoreTier::Weak => "Significant improvements needed.",
        }
    }
}

/// One labelled progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub label: &'static str,
    pub score: Option<f64>,
    pub max_score: f64,
}

impl ScoreBar {
    pub fn percentage(&self) -> Option<f64> {
        self.score.map(|s| s * 100.0 / self.max_score)
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_percentage(self.percentage())
    }

    /// `"8/10"`, or `"/10"` when the model left the score out.
    pub fn fraction_label(&self) -> String {
        format!("{}/{}", format_score(self.score), self.max_score)
    }

    /// Bar fill in percent, clamped for CSS.
    pub fn width(&self) -> f64 {
        self.percentage().unwrap_or(0.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub match_score: Option<f64>,
    pub tier: ScoreTier,
    pub bars: Vec<ScoreBar>,
    pub missing_skills: Vec<String>,
    pub keywords: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ReportView {
    /// `"82%"`; a missing score leaves only the sign.
    pub fn headline(&self) -> String {
        format!("{}%", format_score(self.match_score))
    }

    pub fn verdict(&self) -> &'static str {
        self.tier.verdict()
    }
}

pub fn build_report(result: &AnalysisResult) -> ReportView {
    let bar = |label, score| ScoreBar {
        label,
        score,
        max_score: SUB_SCORE_MAX,
    };

    ReportView {
        match_score: result.match_score,
        tier: ScoreTier::for_percentage(result.match_score),
        bars: vec![
            bar("Formatting", result.formatting),
            bar("Language", result.language_assessment),
            bar("Readability", result.readability),
            bar("Grammar", result.grammar_check),
            bar("Project Structure", result.project_structure),
            bar("Experience Structure", result.experience_structure),
        ],
        missing_skills: result.missing_skills.clone(),
        keywords: result.keyword_alignment.clone(),
        recommendations: result.recommendations.clone(),
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map(|s| s.to_string()).unwrap_or_default()
}
