use diesel::dsl::{IntoBoxed, LeftJoin};
use diesel::pg::Pg;
use diesel::prelude::*;

use super::models::MemberTeamRow;
use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::member::MemberTeamView;
use crate::domain::page::{MemberSortKey, PageRequest, SortDirection};
use crate::domain::ports::MemberSearchRepository;
use crate::domain::search::{Clause, Predicate};
use crate::schema::{members, teams};

type MemberTeamQuery<'a> = IntoBoxed<'a, LeftJoin<members::table, teams::table>, Pg>;

/// `members LEFT JOIN teams` with one WHERE term per clause. Content and
/// count queries both start here.
fn filtered(predicate: &Predicate) -> MemberTeamQuery<'static> {
    let mut query = members::table.left_join(teams::table).into_boxed();
    for clause in predicate.clauses() {
        query = match clause {
            Clause::NameEq(name) => query.filter(members::name.eq(name.clone())),
            Clause::TeamNameEq(team_name) => {
                query.filter(teams::name.nullable().eq(team_name.clone()))
            }
            Clause::AgeGoe(age) => query.filter(members::age.ge(*age)),
            Clause::AgeLoe(age) => query.filter(members::age.le(*age)),
        };
    }
    query
}

fn sorted(query: MemberTeamQuery<'static>, request: &PageRequest) -> MemberTeamQuery<'static> {
    let sort = request.sort();
    let query = match (sort.key, sort.direction) {
        (MemberSortKey::Name, SortDirection::Asc) => query.order_by(members::name.asc()),
        (MemberSortKey::Name, SortDirection::Desc) => query.order_by(members::name.desc()),
        (MemberSortKey::Age, SortDirection::Asc) => query.order_by(members::age.asc()),
        (MemberSortKey::Age, SortDirection::Desc) => query.order_by(members::age.desc()),
        (MemberSortKey::TeamName, SortDirection::Asc) => {
            query.order_by(teams::name.nullable().asc())
        }
        (MemberSortKey::TeamName, SortDirection::Desc) => {
            query.order_by(teams::name.nullable().desc())
        }
    };
    // Tie-break so that consecutive pages never overlap.
    query.then_order_by(members::id.asc())
}

pub struct DieselMemberSearchRepository {
    pool: DbPool,
}

impl DieselMemberSearchRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MemberSearchRepository for DieselMemberSearchRepository {
    fn find_all(&self, predicate: &Predicate) -> Result<Vec<MemberTeamView>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows: Vec<MemberTeamRow> = filtered(predicate)
            .select((
                members::id,
                members::name,
                members::age,
                teams::id.nullable(),
                teams::name.nullable(),
            ))
            .order_by((members::name.asc(), members::id.asc()))
            .load(&mut conn)?;
        Ok(rows.into_iter().map(MemberTeamView::from).collect())
    }

    fn find_page(
        &self,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> Result<Vec<MemberTeamView>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows: Vec<MemberTeamRow> = sorted(filtered(predicate), request)
            .select((
                members::id,
                members::name,
                members::age,
                teams::id.nullable(),
                teams::name.nullable(),
            ))
            .offset(request.offset())
            .limit(request.size())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(MemberTeamView::from).collect())
    }

    fn count(&self, predicate: &Predicate) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        let total = filtered(predicate).count().get_result(&mut conn)?;
        Ok(total)
    }
}
