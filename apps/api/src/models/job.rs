use serde::{Deserialize, Serialize};

use crate::models::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Salary {
    #[serde(default, deserialize_with = "lenient::number")]
    pub min: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub max: f64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub currency: String,
    /// Pay period as reported upstream, e.g. "yearly".
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HiringManager {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

/// A public job posting as served by the HR API. Read-only.
///
/// Only `job_id` and `job_title` must be present. Every other field decodes
/// to its default when missing, `null` or of an unexpected type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(deserialize_with = "lenient::string")]
    pub job_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub work_mode: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::record")]
    pub salary: Salary,
    #[serde(default, deserialize_with = "lenient::count")]
    pub no_of_openings: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_description: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub preferred_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub experience_level: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub interview_process: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub application_deadline: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::record")]
    pub hiring_manager: HiringManager,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created_at: String,
}

impl JobPosting {
    /// One-line header shown above the form: type, mode / location, pay band.
    pub fn summary_line(&self) -> String {
        format!(
            "{} • {} / {} • {} {} - {}",
            self.job_type,
            self.work_mode,
            self.location,
            self.salary.currency,
            self.salary.min,
            self.salary.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_posting_deserializes() {
        let body = json!({
            "job_id": "j-42",
            "job_title": "Backend Engineer",
            "job_type": "Full-time",
            "work_mode": "Remote",
            "department": "Engineering",
            "location": "Berlin",
            "salary": { "min": 70000, "max": 90000, "currency": "EUR", "type": "yearly" },
            "no_of_openings": 2,
            "job_description": "Build services.",
            "required_skills": ["Rust", "SQL"],
            "preferred_skills": [],
            "experience_level": "Senior",
            "interview_process": "Two rounds",
            "application_deadline": "2026-12-01",
            "status": "open",
            "hiring_manager": { "id": "m1", "email": "m@corp.example", "name": "Sam" },
            "created_at": "2026-10-01T09:00:00Z"
        });
        let job: JobPosting = serde_json::from_value(body).unwrap();
        assert_eq!(job.salary.unit, "yearly");
        assert_eq!(job.required_skills.len(), 2);
        assert_eq!(job.hiring_manager.name, "Sam");
        assert_eq!(
            job.summary_line(),
            "Full-time • Remote / Berlin • EUR 70000 - 90000"
        );
    }

    #[test]
    fn test_sparse_posting_defaults_missing_fields() {
        let body = json!({ "job_id": "j-1", "job_title": "Designer" });
        let job: JobPosting = serde_json::from_value(body).unwrap();
        assert!(job.required_skills.is_empty());
        assert!(job.preferred_skills.is_empty());
        assert_eq!(job.no_of_openings, 0);
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let body = json!({
            "job_id": "j-1",
            "job_title": "Designer",
            "interview_process": null,
            "hiring_manager": null,
            "salary": null,
            "required_skills": null,
            "preferred_skills": ["Figma", null],
            "no_of_openings": null,
            "created_at": null
        });
        let job: JobPosting = serde_json::from_value(body).unwrap();
        assert_eq!(job.interview_process, "");
        assert_eq!(job.hiring_manager.name, "");
        assert_eq!(job.salary.min, 0.0);
        assert!(job.required_skills.is_empty());
        assert_eq!(job.preferred_skills, vec!["Figma".to_string()]);
        assert_eq!(job.no_of_openings, 0);
    }

    #[test]
    fn test_mistyped_fields_are_coerced() {
        let body = json!({
            "job_id": 42,
            "job_title": "Data Analyst",
            "salary": { "min": "55000.50", "max": 70000, "currency": null, "type": "yearly" },
            "no_of_openings": "3",
            "hiring_manager": { "id": 7, "email": "m@corp.example", "name": "Sam" },
            "status": true
        });
        let job: JobPosting = serde_json::from_value(body).unwrap();
        assert_eq!(job.job_id, "42");
        assert_eq!(job.salary.min, 55000.5);
        assert_eq!(job.salary.max, 70000.0);
        assert_eq!(job.salary.currency, "");
        assert_eq!(job.no_of_openings, 3);
        assert_eq!(job.hiring_manager.id, "7");
        assert_eq!(job.status, "true");
    }

    #[test]
    fn test_wrong_shape_nested_record_is_defaulted() {
        let body = json!({
            "job_id": "j-2",
            "job_title": "QA",
            "hiring_manager": "Sam",
            "salary": [1, 2]
        });
        let job: JobPosting = serde_json::from_value(body).unwrap();
        assert_eq!(job.hiring_manager.name, "");
        assert_eq!(job.salary.max, 0.0);
    }

    #[test]
    fn test_missing_title_is_still_an_error() {
        assert!(serde_json::from_value::<JobPosting>(json!({ "job_id": "j-3" })).is_err());
    }
}
