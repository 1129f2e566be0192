use meower::naming::{to_kebab_case, to_pascal_case, to_plural, to_snake_case, to_upper_snake_case};

#[test]
fn test_to_pascal_case() {
    assert_eq!(to_pascal_case("my-app"), "MyApp");
    assert_eq!(to_pascal_case("blog-app-v2"), "BlogAppV2");
    assert_eq!(to_pascal_case("API-server"), "ApiServer");
    assert_eq!(to_pascal_case(""), "");
}

#[test]
fn test_to_snake_and_kebab_case() {
    assert_eq!(to_snake_case("UserService"), "user_service");
    assert_eq!(to_kebab_case("UserService"), "user-service");
    assert_eq!(to_snake_case("Post"), "post");
    assert_eq!(to_kebab_case(""), "");
}

#[test]
fn test_to_upper_snake_case() {
    assert_eq!(to_upper_snake_case("blog-app"), "BLOG_APP");
}

#[test]
fn test_to_plural_fixed_cases() {
    assert_eq!(to_plural("category"), "categories");
    assert_eq!(to_plural("class"), "classes");
    assert_eq!(to_plural("user"), "users");
    assert_eq!(to_plural("Branch"), "branches");
    assert_eq!(to_plural("dish"), "dishes");
}

#[test]
fn test_to_plural_irregular_words_are_not_special_cased() {
    assert_eq!(to_plural("person"), "persons");
    assert_eq!(to_plural("child"), "childs");
}

#[test]
fn test_pascal_kebab_round_trip() {
    for name in ["UserService", "BlogPost", "Order", "HttpClientFactory"] {
        assert_eq!(to_pascal_case(&to_kebab_case(name)), name);
    }
}
