use super::entities::{user, User};
use sea_orm::{entity::*, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_uid(&self, uid: &str) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(uid.to_string()).one(&self.db).await
    }

    pub async fn upsert(&self, user_data: &crate::domain::User) -> Result<user::Model, DbErr> {
        if let Some(existing) = self.find_by_uid(&user_data.uid).await? {
            let mut active: user::ActiveModel = existing.into();
            active.email = Set(user_data.email.clone());
            active.name = Set(user_data.name.clone());
            active.update(&self.db).await
        } else {
            let active = user::ActiveModel {
                uid: Set(user_data.uid.clone()),
                email: Set(user_data.email.clone()),
                name: Set(user_data.name.clone()),
                created_at: Set(Some(chrono::Utc::now())),
            };
            active.insert(&self.db).await
        }
    }
}
