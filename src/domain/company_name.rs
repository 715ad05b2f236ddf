/// The submitter's company. Optional on the form, so blank input becomes a placeholder
/// instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyName(String);

impl CompanyName {
    pub const NOT_PROVIDED: &'static str = "Not provided";

    pub fn parse(s: Option<String>) -> CompanyName {
        match s.as_deref().map(str::trim) {
            Some(company) if !company.is_empty() => Self(company.to_string()),
            _ => Self(Self::NOT_PROVIDED.to_string()),
        }
    }
}

impl AsRef<str> for CompanyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
