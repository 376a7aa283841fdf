//! Static batch inputs
//!
//! The URL list and the response size cap are compile-time constants and are
//! deliberately not exposed via TOML configuration.

/// Maximum response body accepted by the shared client, in bytes
pub const MAX_RESPONSE_BYTES: u64 = 1_000_000;

/// Pages fetched by every batch run
pub const DOC_URLS: &[&str] = &[
    "https://docs.microsoft.com",
    "https://docs.microsoft.com/azure",
    "https://docs.microsoft.com/powershell",
    "https://docs.microsoft.com/dotnet",
    "https://docs.microsoft.com/aspnet/core",
    "https://docs.microsoft.com/windows",
    "https://docs.microsoft.com/office",
    "https://docs.microsoft.com/enterprise-mobility-security",
    "https://docs.microsoft.com/visualstudio",
    "https://docs.microsoft.com/microsoft-365",
    "https://docs.microsoft.com/sql",
    "https://docs.microsoft.com/dynamics365",
    "https://docs.microsoft.com/surface",
    "https://docs.microsoft.com/xamarin",
    "https://docs.microsoft.com/azure/devops",
    "https://docs.microsoft.com/system-center",
    "https://docs.microsoft.com/graph",
    "https://docs.microsoft.com/education",
    "https://docs.microsoft.com/gaming",
];

/// The static URL list as owned strings, ready to hand to a batch run
#[must_use]
pub fn doc_urls() -> Vec<String> {
    DOC_URLS.iter().map(|url| (*url).to_string()).collect()
}
