use crate::FunctionsError;

/// Positional string arguments supplied by the host for one invocation.
///
/// Index 0 is always present and non-empty; it is the product identifier or
/// identity token interpolated into the request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestArgs(Vec<String>);

impl RequestArgs {
    pub fn new(args: Vec<String>) -> Result<Self, FunctionsError> {
        match args.first() {
            None => Err(FunctionsError::InvalidArgs(
                "args[0] is required".to_string(),
            )),
            Some(first) if first.is_empty() => Err(FunctionsError::InvalidArgs(
                "args[0] must not be empty".to_string(),
            )),
            Some(_) => Ok(Self(args)),
        }
    }

    /// The mandatory first argument.
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for RequestArgs {
    type Error = FunctionsError;

    fn try_from(args: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(args)
    }
}

/// Build `<base>/<kind>/<arg0>` by plain interpolation.
pub fn resource_url(base_url: &str, resource_kind: &str, args: &RequestArgs) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        resource_kind,
        args.first()
    )
}
