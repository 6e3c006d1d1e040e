use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{LINK_TLDS, NATIONAL_PREFIX, RISK_KEYWORDS};
use crate::error::SafetyError;

/// Why an outbound message was withheld. Closed set; the order of
/// [`UnsafeReason::PRIORITY`] is the order rules are evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsafeReason {
    PhoneNumber,
    Email,
    ExternalLink,
    RiskKeyword,
}

impl UnsafeReason {
    pub const PRIORITY: [UnsafeReason; 4] = [
        UnsafeReason::PhoneNumber,
        UnsafeReason::Email,
        UnsafeReason::ExternalLink,
        UnsafeReason::RiskKeyword,
    ];

    /// Human-readable label shown in the block notice.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PhoneNumber => "número de telefone",
            Self::Email => "endereço de e-mail",
            Self::ExternalLink => "link externo",
            Self::RiskKeyword => "pedido de pagamento ou contacto fora da plataforma",
        }
    }
}

impl std::fmt::Display for UnsafeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scanning one draft. Lives only for one send attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "camelCase")]
pub enum SafetyFindings {
    Safe,
    Unsafe {
        reason: UnsafeReason,
        snippet: Option<String>,
    },
}

impl SafetyFindings {
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }

    pub fn reason(&self) -> Option<UnsafeReason> {
        match self {
            Self::Safe => None,
            Self::Unsafe { reason, .. } => Some(*reason),
        }
    }

    pub fn snippet(&self) -> Option<&str> {
        match self {
            Self::Safe => None,
            Self::Unsafe { snippet, .. } => snippet.as_deref(),
        }
    }
}

// Rule-based scanner for outbound chat text. Stateless after construction:
// the same input always yields the same findings.
pub struct ContentSafetyFilter {
    phone: Regex,
    email: Regex,
    link: Regex,
    // Stored lowercased
    keywords: Vec<String>,
}

impl ContentSafetyFilter {
    pub fn new() -> Result<Self, SafetyError> {
        // 9XX XXX XXX, optionally behind +244 / 00244 / 244. Group 1 is the
        // number itself; the leading class keeps it out of longer digit or
        // word runs. Dots are not separators: `950.000.000` is a price.
        let phone = Regex::new(&format!(
            r"(?:^|[^\w+])((?:(?:\+|00)?{NATIONAL_PREFIX}[ -]?)?9\d{{2}}[ -]?\d{{3}}[ -]?\d{{3}})\b"
        ))?;

        let email = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")?;

        let link = Regex::new(&format!(
            // Bare tokens need a lowercase TLD so "quartos.Me diga" is prose.
            r"(?i:https?://|www\.)\S+|\b[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.(?:{})\b",
            LINK_TLDS.join("|")
        ))?;

        let keywords = RISK_KEYWORDS.iter().map(|k| k.to_lowercase()).collect();

        Ok(Self {
            phone,
            email,
            link,
            keywords,
        })
    }

    /// Extend the risk-keyword list. Duplicates are ignored.
    pub fn with_extra_keywords<I, S>(mut self, extra: I) -> Result<Self, SafetyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in extra {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(SafetyError::BlankKeyword);
            }
            if !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
        Ok(self)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Classify a draft. The first rule in [`UnsafeReason::PRIORITY`] that
    /// fires is reported; later rules are not consulted.
    pub fn evaluate(&self, text: &str) -> SafetyFindings {
        let lowered = text.to_lowercase();
        UnsafeReason::PRIORITY
            .iter()
            .find_map(|reason| self.check(*reason, text, &lowered))
            .unwrap_or(SafetyFindings::Safe)
    }

    /// Every rule that fires, in priority order. Diagnostic only; the chat
    /// workflow surfaces just the first.
    pub fn evaluate_all(&self, text: &str) -> Vec<SafetyFindings> {
        let lowered = text.to_lowercase();
        UnsafeReason::PRIORITY
            .iter()
            .filter_map(|reason| self.check(*reason, text, &lowered))
            .collect()
    }

    fn check(&self, reason: UnsafeReason, text: &str, lowered: &str) -> Option<SafetyFindings> {
        let snippet = match reason {
            UnsafeReason::PhoneNumber => self
                .phone
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
            UnsafeReason::Email => self.email.find(text).map(|m| m.as_str().to_string()),
            UnsafeReason::ExternalLink => self.link.find(text).map(|m| m.as_str().to_string()),
            UnsafeReason::RiskKeyword => self
                .keywords
                .iter()
                .find(|k| lowered.contains(k.as_str()))
                .cloned(),
        }?;

        Some(SafetyFindings::Unsafe {
            reason,
            snippet: Some(snippet),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ContentSafetyFilter {
        ContentSafetyFilter::new().unwrap()
    }

    #[test]
    fn test_phone_number_blocked() {
        let findings = filter().evaluate("liga-me 923111222");
        assert_eq!(findings.reason(), Some(UnsafeReason::PhoneNumber));
        assert!(findings.snippet().unwrap().contains("923111222"));
    }

    #[test]
    fn test_phone_number_variants() {
        let f = filter();
        for text in [
            "923 111 222",
            "o número é +244 923111222, obrigado",
            "00244923-111-222",
            "244923111222",
            "ligue 912-345-678 amanhã",
        ] {
            assert_eq!(
                f.evaluate(text).reason(),
                Some(UnsafeReason::PhoneNumber),
                "{text}"
            );
        }
    }

    #[test]
    fn test_phone_not_matched_inside_longer_number() {
        let f = filter();
        assert!(f.evaluate("referência 19231112223").is_safe());
        assert!(f.evaluate("referência 1244923111222").is_safe());
        assert!(f.evaluate("lote A244923111222").is_safe());
        assert!(f.evaluate("x923111222").is_safe());
    }

    #[test]
    fn test_prefixed_phone_snippet_excludes_leading_text() {
        let findings = filter().evaluate("(+244 923111222)");
        assert_eq!(findings.snippet(), Some("+244 923111222"));
        let findings = filter().evaluate("244923111222 é o meu");
        assert_eq!(findings.snippet(), Some("244923111222"));
    }

    #[test]
    fn test_prices_with_dots_are_not_phones() {
        let f = filter();
        assert!(f.evaluate("o preço é 950.000.000 kz").is_safe());
        // Space-grouped 9-digit amounts are indistinguishable from a mobile
        // number and stay flagged.
        assert_eq!(
            f.evaluate("o preço é 950 000 000 kz").reason(),
            Some(UnsafeReason::PhoneNumber)
        );
    }

    #[test]
    fn test_missing_space_after_full_stop_is_not_a_link() {
        let f = filter();
        assert!(f.evaluate("Tem 3 quartos.Me diga o preço").is_safe());
        assert!(f.evaluate("Fica no centro.Ao lado há uma escola").is_safe());
        assert_eq!(
            f.evaluate("veja Casas.ao").reason(),
            Some(UnsafeReason::ExternalLink)
        );
        assert_eq!(
            f.evaluate("WWW.EXEMPLO.COM").reason(),
            Some(UnsafeReason::ExternalLink)
        );
    }

    #[test]
    fn test_email_blocked() {
        let findings = filter().evaluate("contacta joao@example.com");
        assert_eq!(findings.reason(), Some(UnsafeReason::Email));
        assert_eq!(findings.snippet(), Some("joao@example.com"));
    }

    #[test]
    fn test_link_blocked() {
        let f = filter();
        let findings = f.evaluate("vê o imóvel em www.example.com");
        assert_eq!(findings.reason(), Some(UnsafeReason::ExternalLink));
        assert_eq!(findings.snippet(), Some("www.example.com"));

        assert_eq!(
            f.evaluate("fotos em https://fotos.exemplo/abc").reason(),
            Some(UnsafeReason::ExternalLink)
        );
        assert_eq!(
            f.evaluate("procura em casasbaratas.ao").reason(),
            Some(UnsafeReason::ExternalLink)
        );
    }

    #[test]
    fn test_risk_keyword_blocked() {
        let findings = filter().evaluate("prefiro pagamento direto");
        assert_eq!(findings.reason(), Some(UnsafeReason::RiskKeyword));
        assert_eq!(findings.snippet(), Some("pagamento direto"));
    }

    #[test]
    fn test_risk_keyword_case_insensitive() {
        let findings = filter().evaluate("Fala comigo no WhatsApp");
        assert_eq!(findings.reason(), Some(UnsafeReason::RiskKeyword));
        assert_eq!(findings.snippet(), Some("whatsapp"));
    }

    #[test]
    fn test_ordinary_text_is_safe() {
        let f = filter();
        assert!(f.evaluate("Olá, gostaria de agendar uma visita").is_safe());
        assert!(f.evaluate("Bom dia, o imóvel está disponível?").is_safe());
        assert!(f.evaluate("A renda inclui água e luz? São 3 quartos.").is_safe());
    }

    #[test]
    fn test_empty_is_safe() {
        assert_eq!(filter().evaluate(""), SafetyFindings::Safe);
        assert!(filter().evaluate("   ").is_safe());
    }

    #[test]
    fn test_first_rule_wins() {
        let text = "liga 923111222 ou escreve para ana@casa.ao, pagamento direto";
        let f = filter();
        assert_eq!(f.evaluate(text).reason(), Some(UnsafeReason::PhoneNumber));

        let all: Vec<_> = f.evaluate_all(text).iter().filter_map(|x| x.reason()).collect();
        assert_eq!(
            all,
            vec![
                UnsafeReason::PhoneNumber,
                UnsafeReason::Email,
                UnsafeReason::ExternalLink,
                UnsafeReason::RiskKeyword,
            ]
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let f = filter();
        let text = "manda para joao@example.com";
        assert_eq!(f.evaluate(text), f.evaluate(text));
    }

    #[test]
    fn test_extra_keywords() {
        let f = filter().with_extra_keywords(["Kwik", "whatsapp"]).unwrap();
        assert_eq!(
            f.keywords().iter().filter(|k| k.as_str() == "whatsapp").count(),
            1
        );
        let findings = f.evaluate("paga por KWIK");
        assert_eq!(findings.snippet(), Some("kwik"));

        assert!(filter().with_extra_keywords(["  "]).is_err());
    }

    #[test]
    fn test_findings_serialize_tagged() {
        let json = serde_json::to_value(filter().evaluate("liga 923111222")).unwrap();
        assert_eq!(json["verdict"], "unsafe");
        assert_eq!(json["reason"], "phone-number");
    }
}
