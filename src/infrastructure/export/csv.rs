use crate::domain::employee::Employee;

/// Renders the downloadable artifact for a result set: a CSV with one line
/// per employee and skill names joined by `" | "`. Employees without skills
/// render `No Skills`.
pub fn render_employees_csv(employees: &[Employee]) -> String {
    let mut csv = String::from("EmployeeId,Name,Department,Skills\n");

    for employee in employees {
        let skills = match employee.skills.as_deref() {
            Some(skills) if !skills.is_empty() => skills
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
            _ => "No Skills".to_string(),
        };
        csv.push_str(&format!(
            "{},{},{},{}\n",
            employee.employee_id, employee.name, employee.department, skills
        ));
    }

    csv
}
