/// Permission identifiers a UI element declares it needs.
///
/// Callers may pass nothing, one identifier, or a list; every form is
/// normalized here once. Identifiers are opaque and kept verbatim, so a
/// blank one is a real requirement that nothing grants. Duplicates
/// collapse, keeping first-seen order. Only an absent requirement or an
/// empty list declares no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirement(Vec<String>);

impl Requirement {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any_of<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for id in identifiers {
            let id: String = id.into();
            if !normalized.contains(&id) {
                normalized.push(id);
            }
        }
        Self(normalized)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    pub fn identifiers(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Requirement {
    fn from(id: &str) -> Self {
        Requirement::any_of([id])
    }
}

impl From<String> for Requirement {
    fn from(id: String) -> Self {
        Requirement::any_of([id])
    }
}

impl From<&String> for Requirement {
    fn from(id: &String) -> Self {
        Requirement::any_of([id.as_str()])
    }
}

impl From<Vec<String>> for Requirement {
    fn from(ids: Vec<String>) -> Self {
        Requirement::any_of(ids)
    }
}

impl From<Vec<&str>> for Requirement {
    fn from(ids: Vec<&str>) -> Self {
        Requirement::any_of(ids)
    }
}

impl From<&[String]> for Requirement {
    fn from(ids: &[String]) -> Self {
        Requirement::any_of(ids.iter().map(String::as_str))
    }
}

impl From<&[&str]> for Requirement {
    fn from(ids: &[&str]) -> Self {
        Requirement::any_of(ids.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Requirement {
    fn from(ids: [&str; N]) -> Self {
        Requirement::any_of(ids)
    }
}

impl<T: Into<Requirement>> From<Option<T>> for Requirement {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
