use crate::auth::{Identity, Role};
use crate::error::ApiError;
use crate::tasks::repo_types::Task;

/// What the requester wants to do with a task; only used to word the denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    View,
    Update,
    Delete,
}

impl TaskAction {
    fn verb(self) -> &'static str {
        match self {
            TaskAction::View => "view",
            TaskAction::Update => "update",
            TaskAction::Delete => "delete",
        }
    }
}

/// Ownership decision for single-task operations: admins may act on any task,
/// everyone else only on tasks they own. Pure, no side effects; callers run it
/// fresh on every request.
pub fn authorize(identity: Identity, task: &Task, action: TaskAction) -> Result<(), ApiError> {
    if identity.role == Role::Admin || identity.user_id == task.user_id {
        return Ok(());
    }
    Err(ApiError::forbidden(format!(
        "Forbidden: You can only {} your own tasks",
        action.verb()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::repo_types::TaskStatus;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn task_owned_by(user_id: Uuid) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "write tests".into(),
            status: TaskStatus::Pending,
            user_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn owner_may_do_everything() {
        let me = identity(Role::User);
        let task = task_owned_by(me.user_id);
        for action in [TaskAction::View, TaskAction::Update, TaskAction::Delete] {
            assert!(authorize(me, &task, action).is_ok());
        }
    }

    #[test]
    fn other_user_is_forbidden() {
        let me = identity(Role::User);
        let task = task_owned_by(Uuid::new_v4());
        for action in [TaskAction::View, TaskAction::Update, TaskAction::Delete] {
            let err = authorize(me, &task, action).unwrap_err();
            assert!(matches!(err, ApiError::Forbidden(_)));
        }
    }

    #[test]
    fn admin_bypasses_ownership() {
        let admin = identity(Role::Admin);
        let task = task_owned_by(Uuid::new_v4());
        for action in [TaskAction::View, TaskAction::Update, TaskAction::Delete] {
            assert!(authorize(admin, &task, action).is_ok());
        }
    }

    #[test]
    fn denial_names_the_action() {
        let me = identity(Role::User);
        let task = task_owned_by(Uuid::new_v4());
        let err = authorize(me, &task, TaskAction::Delete).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Forbidden: You can only delete your own tasks"
        );
    }
}
