use chrono::{TimeZone, Utc};
use herobook_domain::{
    initialize_combat_stats, Ability, AbilityScores, Character, CharacterClass, CharacterName,
    ContentName, CoreStats, Email, Monster, MonsterType, Race, Skill, User, Username,
};
use neo4rs::query;

use super::test_harness::Neo4jTestHarness;
use super::{Neo4jCharacterRepo, Neo4jMonsterRepo, Neo4jOwnershipRepo, Neo4jUserRepo};
use crate::infrastructure::ports::{CharacterRepo, MonsterRepo, OwnershipRepo, RepoError, UserRepo};

fn user(name: &str) -> User {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    User::new(
        Username::new(name).unwrap(),
        Email::new(format!("{name}@example.com")).unwrap(),
        "hash",
        now,
    )
}

fn fighter() -> Character {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let name = CharacterName::new("Regdar").unwrap();
    let core = CoreStats::new(name.clone())
        .with_race(Race::Human)
        .with_abilities(
            AbilityScores::default()
                .with(Ability::Strength, 14)
                .with(Ability::Dexterity, 16)
                .with(Ability::Constitution, 12),
        );
    initialize_combat_stats(
        Character::new(name, CharacterClass::Fighter, now)
            .with_core(core)
            .with_background("Soldier"),
    )
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn character_round_trips_through_the_graph() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let repo = Neo4jCharacterRepo::new(harness.graph());

    let mut character = fighter();
    character.skills_mut().set(Skill::Athletics, true);
    character.saving_throws_mut().set(Ability::Strength, true);
    repo.create(&character).await.expect("create");

    let loaded = repo.get(character.id()).await.expect("get").expect("exists");
    assert_eq!(loaded, character);
    assert_eq!(loaded.core().combat().hit_points, 11);
    assert_eq!(loaded.background(), Some("Soldier"));
    assert!(loaded.core().description().is_none());
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn stale_level_and_unknown_skill_keys_are_normalized_on_load() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let graph = harness.graph();
    let repo = Neo4jCharacterRepo::new(graph.clone());

    let character = fighter();
    repo.create(&character).await.expect("create");

    graph
        .run(
            query(
                "MATCH (c:Character {id: $id})
                SET c.experience = 6500, c.level = 1,
                    c.skills = '{\"stealth\": true, \"juggling\": true}'",
            )
            .param("id", character.id().to_string()),
        )
        .await
        .expect("corrupt record");

    let loaded = repo.get(character.id()).await.expect("get").expect("exists");
    assert_eq!(loaded.core().level(), 5);
    assert!(loaded.skills().is_proficient(Skill::Stealth));
    assert_eq!(loaded.skills().proficient_keys(), vec![Skill::Stealth]);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn update_of_deleted_character_reports_not_found() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let repo = Neo4jCharacterRepo::new(harness.graph());

    let character = fighter();
    repo.create(&character).await.expect("create");
    assert!(repo.delete(character.id()).await.expect("delete"));
    assert!(!repo.delete(character.id()).await.expect("second delete"));

    let err = repo.update(&character).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn stale_copy_is_rejected_after_another_write() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let repo = Neo4jCharacterRepo::new(harness.graph());

    let character = fighter();
    repo.create(&character).await.expect("create");

    let mut first = repo.get(character.id()).await.unwrap().expect("exists");
    let mut second = first.clone();

    first.core_mut().set_ability_score(Ability::Strength, 18);
    repo.update(&first).await.expect("first write");

    second.core_mut().set_ability_score(Ability::Wisdom, 16);
    let err = repo.update(&second).await.unwrap_err();
    assert!(err.is_conflict());

    let loaded = repo.get(character.id()).await.unwrap().expect("exists");
    assert_eq!(loaded.version(), 1);
    assert_eq!(loaded.core().ability_score(Ability::Strength), 18);
    assert_eq!(loaded.core().ability_score(Ability::Wisdom), 10);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn soft_deleted_character_is_hidden_from_get_and_update() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let graph = harness.graph();
    let repo = Neo4jCharacterRepo::new(graph.clone());

    let character = fighter();
    repo.create(&character).await.expect("create");
    graph
        .run(
            query("MATCH (c:Character {id: $id}) SET c.deleted_at = '2024-01-01T00:00:00Z'")
                .param("id", character.id().to_string()),
        )
        .await
        .expect("mark deleted");

    assert!(repo.get(character.id()).await.unwrap().is_none());
    let err = repo.update(&character).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn ownership_edge_is_unique_and_removed_with_the_character() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let graph = harness.graph();
    let users = Neo4jUserRepo::new(graph.clone());
    let characters = Neo4jCharacterRepo::new(graph.clone());
    let ownership = Neo4jOwnershipRepo::new(graph.clone());

    let owner = user("regdar");
    let stranger = user("lidda");
    users.create(&owner).await.expect("create owner");
    users.create(&stranger).await.expect("create stranger");

    let character = fighter();
    characters.create(&character).await.expect("create character");
    ownership.connect(character.id(), owner.id()).await.expect("connect");
    ownership.connect(character.id(), owner.id()).await.expect("connect again");

    let mut result = graph
        .execute(
            query("MATCH (:User {id: $id})-[r:OWNS_CHARACTER]->(:Character) RETURN count(r) AS n")
                .param("id", owner.id().to_string()),
        )
        .await
        .expect("count edges");
    let row = result.next().await.expect("row").expect("some row");
    assert_eq!(row.get::<i64>("n").unwrap(), 1);

    assert!(ownership.is_owner(character.id(), owner.id()).await.unwrap());
    assert!(!ownership.is_owner(character.id(), stranger.id()).await.unwrap());
    assert_eq!(characters.list_owned_by(owner.id()).await.unwrap().len(), 1);

    characters.delete(character.id()).await.expect("delete");
    assert!(!ownership.is_owner(character.id(), owner.id()).await.unwrap());
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn connect_without_user_reports_not_found() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let characters = Neo4jCharacterRepo::new(harness.graph());
    let ownership = Neo4jOwnershipRepo::new(harness.graph());

    let character = fighter();
    characters.create(&character).await.expect("create");

    let err = ownership
        .connect(character.id(), user("ghost").id())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn spells_are_shared_nodes_listed_per_character() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let repo = Neo4jCharacterRepo::new(harness.graph());

    let a = fighter();
    let b = fighter();
    repo.create(&a).await.unwrap();
    repo.create(&b).await.unwrap();

    let shield = ContentName::new("Shield").unwrap();
    repo.add_spell(a.id(), &shield).await.unwrap();
    repo.add_spell(a.id(), &shield).await.unwrap();
    repo.add_spell(b.id(), &ContentName::new("Bless").unwrap()).await.unwrap();
    repo.add_feature(a.id(), &ContentName::new("Second Wind").unwrap())
        .await
        .unwrap();

    assert_eq!(repo.list_spells(a.id()).await.unwrap(), vec![shield]);
    assert_eq!(repo.list_spells(b.id()).await.unwrap().len(), 1);
    assert_eq!(repo.list_features(a.id()).await.unwrap().len(), 1);
    assert!(repo.list_features(b.id()).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn duplicate_username_is_a_constraint_violation() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let repo = Neo4jUserRepo::new(harness.graph());

    repo.create(&user("mialee")).await.expect("first");
    let err = repo.create(&user("mialee")).await.unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));

    let found = repo
        .find_by_email(&Email::new("MIALEE@example.com").unwrap())
        .await
        .unwrap();
    assert!(found.is_some());
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn monster_round_trips_through_the_graph() {
    let harness = Neo4jTestHarness::start().await.expect("start harness");
    let repo = Neo4jMonsterRepo::new(harness.graph());

    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let monster = Monster::new(
        CharacterName::new("Owlbear").unwrap(),
        MonsterType::Monstrosity,
        now,
    )
    .with_challenge_rating(3.0)
    .unwrap()
    .with_experience_points(700);
    repo.create(&monster).await.expect("create");

    let loaded = repo.get(monster.id()).await.unwrap().expect("exists");
    assert_eq!(loaded, monster);
    assert_eq!(repo.list().await.unwrap().len(), 1);
    assert!(repo.delete(monster.id()).await.unwrap());
    assert!(repo.get(monster.id()).await.unwrap().is_none());
}
