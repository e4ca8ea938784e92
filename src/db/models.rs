use crate::db::sql::SqlValue;
use crate::error::JoblyError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

const MAX_HANDLE_LEN: usize = 25;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i64>,
    pub logo_url: Option<String>,
}

/// A company together with the jobs it owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<Equity>,
    pub company_handle: String,
}

/// Fixed-point decimal in `[0, 1]`, kept as its exact decimal text.
///
/// Deserializes from either a JSON string (kept verbatim) or a JSON number
/// (taken by its shortest round-trip representation), and always serializes
/// back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Equity(String);

impl Equity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Equity {
    type Err = JoblyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid =
            || JoblyError::BadRequest(format!("equity must be a decimal between 0 and 1: {raw}"));
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        let s = raw.trim();
        let (int_part, frac_part) = match s.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (s, None),
        };
        let shape_ok = (digits(int_part) || (int_part.is_empty() && frac_part.is_some()))
            && frac_part.is_none_or(digits);
        if !shape_ok {
            return Err(invalid());
        }

        let in_range = match int_part.trim_start_matches('0') {
            "" => true,
            "1" => frac_part.is_none_or(|f| f.bytes().all(|b| b == b'0')),
            _ => false,
        };
        if !in_range {
            return Err(invalid());
        }

        if int_part.is_empty() {
            Ok(Equity(format!("0{s}")))
        } else {
            Ok(Equity(s.to_string()))
        }
    }
}

impl<'de> Deserialize<'de> for Equity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EquityVisitor;

        impl Visitor<'_> for EquityVisitor {
            type Value = Equity;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal between 0 and 1, as a number or string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Equity, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Equity, E> {
                v.to_string().parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Equity, E> {
                v.to_string().parse().map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Equity, E> {
                if !v.is_finite() {
                    return Err(E::custom("equity must be finite"));
                }
                format!("{v}").parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(EquityVisitor)
    }
}

impl From<Equity> for SqlValue {
    fn from(v: Equity) -> Self {
        SqlValue::Text(v.0)
    }
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn bad_request(problems: Vec<String>) -> Result<(), JoblyError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(JoblyError::BadRequest(problems.join("; ")))
    }
}

fn check_non_empty(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{field} must not be empty"));
    }
}

fn check_non_negative(problems: &mut Vec<String>, field: &str, value: Option<i64>) {
    if value.is_some_and(|v| v < 0) {
        problems.push(format!("{field} must be >= 0"));
    }
}

fn check_url(problems: &mut Vec<String>, field: &str, value: Option<&str>) {
    if let Some(raw) = value
        && url::Url::parse(raw).is_err()
    {
        problems.push(format!("{field} must be a valid URL"));
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i64>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), JoblyError> {
        let mut problems = Vec::new();
        let handle_len = self.handle.chars().count();
        if handle_len == 0 || handle_len > MAX_HANDLE_LEN {
            problems.push(format!("handle must be 1-{MAX_HANDLE_LEN} characters"));
        }
        check_non_empty(&mut problems, "name", &self.name);
        check_non_negative(&mut problems, "numEmployees", self.num_employees);
        check_url(&mut problems, "logoUrl", self.logo_url.as_deref());
        bad_request(problems)
    }
}

/// Fields a company update may touch. `handle` is not among them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub num_employees: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    /// Storage-bound `(field, value)` pairs for the fields present, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.as_str().into()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.as_str().into()));
        }
        if let Some(num_employees) = self.num_employees {
            fields.push(("numEmployees", num_employees.into()));
        }
        if let Some(logo_url) = &self.logo_url {
            fields.push(("logoUrl", logo_url.clone().into()));
        }
        fields
    }

    pub fn validate(&self) -> Result<(), JoblyError> {
        let mut problems = Vec::new();
        if let Some(name) = &self.name {
            check_non_empty(&mut problems, "name", name);
        }
        check_non_negative(&mut problems, "numEmployees", self.num_employees.flatten());
        check_url(
            &mut problems,
            "logoUrl",
            self.logo_url.as_ref().and_then(|u| u.as_deref()),
        );
        bad_request(problems)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub equity: Option<Equity>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), JoblyError> {
        let mut problems = Vec::new();
        check_non_empty(&mut problems, "title", &self.title);
        check_non_empty(&mut problems, "companyHandle", &self.company_handle);
        check_non_negative(&mut problems, "salary", self.salary);
        bad_request(problems)
    }
}

/// Fields a job update may touch. Unknown keys, `id` and `companyHandle`
/// included, are rejected during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub equity: Option<Option<Equity>>,
}

impl JobUpdate {
    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title", title.as_str().into()));
        }
        if let Some(salary) = self.salary {
            fields.push(("salary", salary.into()));
        }
        if let Some(equity) = &self.equity {
            fields.push(("equity", equity.clone().into()));
        }
        fields
    }

    pub fn validate(&self) -> Result<(), JoblyError> {
        let mut problems = Vec::new();
        if let Some(title) = &self.title {
            check_non_empty(&mut problems, "title", title);
        }
        check_non_negative(&mut problems, "salary", self.salary.flatten());
        bad_request(problems)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    /// Bounds check the store deliberately leaves to its callers.
    pub fn validate(&self) -> Result<(), JoblyError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees)
            && min > max
        {
            return Err(JoblyError::BadRequest(
                "minEmployees cannot be greater than maxEmployees".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<bool>,
}
