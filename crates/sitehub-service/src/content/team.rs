//! Team roster grouped by department.

use serde::Serialize;

use sitehub_core::error::AppError;
use sitehub_entity::content::{Content, TeamMember};

use super::service::{ContentService, ListParams};
use crate::context::RequestContext;

/// Label for members without a department.
pub const UNASSIGNED: &str = "Unassigned";

/// One department and its members.
#[derive(Debug, Clone, Serialize)]
pub struct Department {
    pub department: String,
    pub members: Vec<Content<TeamMember>>,
}

impl ContentService<TeamMember> {
    /// The roster grouped by department, in department order. Members
    /// without a department come last.
    pub async fn grouped(
        &self,
        ctx: Option<&RequestContext>,
    ) -> Result<Vec<Department>, AppError> {
        let members = self.list(ctx, &ListParams::default()).await?;
        Ok(group_by_department(members))
    }
}

fn group_by_department(members: Vec<Content<TeamMember>>) -> Vec<Department> {
    let mut groups: Vec<Department> = Vec::new();
    let mut unassigned = Vec::new();

    for member in members {
        let Some(name) = member.record.department.clone().filter(|d| !d.is_empty()) else {
            unassigned.push(member);
            continue;
        };
        match groups.iter_mut().find(|g| g.department == name) {
            Some(group) => group.members.push(member),
            None => groups.push(Department {
                department: name,
                members: vec![member],
            }),
        }
    }

    groups.sort_by(|a, b| a.department.cmp(&b.department));
    if !unassigned.is_empty() {
        groups.push(Department {
            department: UNASSIGNED.to_string(),
            members: unassigned,
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use serde_json::json;

    fn member(name: &str, department: Option<&str>) -> serde_json::Value {
        json!({
            "name": name,
            "role": "Software Engineer",
            "department": department,
            "image": "https://cdn.example.com/p.png",
        })
    }

    #[tokio::test]
    async fn test_grouped_roster() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        let service = h.content::<TeamMember>();
        service.create(Some(&admin), member("Ann", Some("Engineering"))).await.unwrap();
        service.create(Some(&admin), member("Ben", None)).await.unwrap();
        service.create(Some(&admin), member("Cid", Some("Marketing"))).await.unwrap();
        service.create(Some(&admin), member("Dee", Some("Engineering"))).await.unwrap();

        let groups = service.grouped(None).await.unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.department.as_str()).collect();
        assert_eq!(names, vec!["Engineering", "Marketing", UNASSIGNED]);
        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[2].members[0].record.name, "Ben");
        assert_eq!(groups[1].members[0].record.country, "Kenya");
    }
}
