use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use super::models::{MemberRow, NewMemberRow, NewTeamRow};
use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::member::{MemberView, NewMember};
use crate::domain::ports::MemberRepository;
use crate::schema::{members, teams};

pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MemberRepository for DieselMemberRepository {
    fn create_team(&self, name: &str) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(teams::table)
            .values(&NewTeamRow {
                id,
                name: name.to_string(),
            })
            .execute(&mut conn)?;
        Ok(id)
    }

    fn create(&self, member: NewMember) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(members::table)
            .values(&NewMemberRow {
                id,
                name: member.name,
                age: member.age,
                city: member.address.city,
                street: member.address.street,
                zipcode: member.address.zipcode,
                team_id: member.team_id,
            })
            .execute(&mut conn)?;
        Ok(id)
    }

    fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let exists = diesel::select(diesel::dsl::exists(
            members::table.filter(members::name.eq(name)),
        ))
        .get_result(&mut conn)?;
        Ok(exists)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<MemberView>, DomainError> {
        let mut conn = self.pool.get()?;
        let member = members::table
            .find(id)
            .select(MemberRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(member.map(MemberView::from))
    }

    fn find_all(&self) -> Result<Vec<MemberView>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = members::table
            .select(MemberRow::as_select())
            .order((members::name.asc(), members::id.asc()))
            .load(&mut conn)?;
        Ok(rows.into_iter().map(MemberView::from).collect())
    }

    fn update_name(&self, id: Uuid, name: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let updated = diesel::update(members::table.find(id))
            .set((members::name.eq(name), members::updated_at.eq(Utc::now())))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }
}
