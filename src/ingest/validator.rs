use crate::domain::employee::Employee;

/// Rejection reason for a non-positive id or a blank name.
pub const REASON_INVALID_IDENTITY: &str = "Invalid EmployeeId or Name is missing";
/// Rejection reason for a supplied skill with a blank name.
pub const REASON_SKILL_NAME_REQUIRED: &str = "Skill name is required";

/// Normalization defaults applied while validating.
///
/// Injected at pipeline construction so deployments can change the defaults
/// without touching the rules.
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    pub default_department: String,
    pub default_skill_category: String,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            default_department: "General".to_string(),
            default_skill_category: "General".to_string(),
        }
    }
}

/// Splits raw records into disjoint `(valid, rejected)` sequences,
/// preserving input order within each.
///
/// Rules, applied per record in order:
/// 1. A non-positive id or blank name rejects the record.
/// 2. A blank department is replaced by the policy default.
/// 3. When a skill list is present (`Some`, even if empty), the first skill
///    with a blank name rejects the whole record and ends the scan;
///    otherwise blank skill categories are replaced by the policy default.
/// 4. A record without a skill list, or whose list fully passes, is valid.
///
/// Pure function: all defaulting happens here, downstream components treat
/// the records as immutable values.
pub fn validate_records(
    records: Vec<Employee>,
    policy: &ValidationPolicy,
) -> (Vec<Employee>, Vec<Employee>) {
    let mut valid = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for mut employee in records {
        if employee.employee_id <= 0 || is_blank(&employee.name) {
            rejected.push(employee.with_error(REASON_INVALID_IDENTITY));
            continue;
        }

        if is_blank(&employee.department) {
            employee.department = policy.default_department.clone();
        }

        let has_blank_skill_name = employee
            .skills
            .as_ref()
            .map_or(false, |skills| skills.iter().any(|s| is_blank(&s.name)));
        if has_blank_skill_name {
            rejected.push(employee.with_error(REASON_SKILL_NAME_REQUIRED));
            continue;
        }

        if let Some(skills) = employee.skills.as_mut() {
            for skill in skills {
                if is_blank(&skill.category) {
                    skill.category = policy.default_skill_category.clone();
                }
            }
        }

        valid.push(employee);
    }

    (valid, rejected)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
