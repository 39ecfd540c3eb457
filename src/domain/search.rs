//! Dynamic member search predicates.
//!
//! A [`Predicate`] is a conjunction of [`Clause`]s. Each clause helper returns
//! `None` for an unset filter, and adding `None` to a predicate leaves it
//! unchanged, so a condition with nothing set yields the match-all predicate.

use super::member::MemberTeamView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchCondition {
    pub name: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn to_predicate(&self) -> Predicate {
        Predicate::match_all()
            .and(name_eq(self.name.as_deref()))
            .and(team_name_eq(self.team_name.as_deref()))
            .and_all(age_between(self.age_goe, self.age_loe))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    NameEq(String),
    TeamNameEq(String),
    AgeGoe(i32),
    AgeLoe(i32),
}

impl Clause {
    pub fn matches(&self, row: &MemberTeamView) -> bool {
        match self {
            Clause::NameEq(name) => &row.name == name,
            // A member without a team has a NULL team name, which never
            // compares equal.
            Clause::TeamNameEq(team_name) => row.team_name.as_ref() == Some(team_name),
            Clause::AgeGoe(age) => row.age >= *age,
            Clause::AgeLoe(age) => row.age <= *age,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Option<Clause>) -> Self {
        if let Some(clause) = clause {
            self.clauses.push(clause);
        }
        self
    }

    pub fn and_all(mut self, other: Predicate) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, row: &MemberTeamView) -> bool {
        self.clauses.iter().all(|clause| clause.matches(row))
    }
}

fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn name_eq(name: Option<&str>) -> Option<Clause> {
    has_text(name).map(|n| Clause::NameEq(n.to_string()))
}

pub fn team_name_eq(team_name: Option<&str>) -> Option<Clause> {
    has_text(team_name).map(|n| Clause::TeamNameEq(n.to_string()))
}

pub fn age_goe(age: Option<i32>) -> Option<Clause> {
    age.map(Clause::AgeGoe)
}

pub fn age_loe(age: Option<i32>) -> Option<Clause> {
    age.map(Clause::AgeLoe)
}

pub fn age_between(goe: Option<i32>, loe: Option<i32>) -> Predicate {
    Predicate::match_all().and(age_goe(goe)).and(age_loe(loe))
}
