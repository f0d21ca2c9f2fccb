use super::CompanyInfo;

/// Finds the listed company a free-form query refers to
///
/// Identifiers and short names must match exactly (ignoring case); full
/// names match on substring. Exact matches win over substring matches.
#[must_use]
pub fn find_company<'a>(companies: &'a [CompanyInfo], query: &str) -> Option<&'a CompanyInfo> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let exact = companies.iter().find(|company| {
        company.tadawul_id.to_lowercase() == needle
            || company.company_id.to_string() == needle
            || (!company.acrynom_name.is_empty() && company.acrynom_name.to_lowercase() == needle)
            || (!company.acrynom_name_ar.is_empty() && company.acrynom_name_ar == needle)
    });

    exact.or_else(|| {
        companies.iter().find(|company| {
            company.company_name.to_lowercase().contains(&needle)
                || (!company.company_name_ar.is_empty() && company.company_name_ar.contains(&needle))
        })
    })
}
