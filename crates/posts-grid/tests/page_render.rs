//! End-to-end page rendering: several grids sharing one page render.

use std::cell::RefCell;
use std::io::Write;

use posts_grid::{
    ContentItem, ContentRepository, MemoryRepository, MemoryStore, PageRenderer, QuerySpec,
    RepositoryError, EMPTY_MARKER,
};

const POSTS: &str = r#"
- id: 1
  title: First
  permalink: "https://example.com/?p=1"
  date: "2024-05-06T08:00:00+00:00"
  excerpt: "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty twentyone twentytwo twentythree twentyfour twentyfive twentysix twentyseven twentyeight twentynine thirty"
  thumbnail:
    alt: First image
    sizes:
      medium_large: { url: "https://example.com/1.jpg", width: 768, height: 512 }
- id: 2
  title: Second
  permalink: "https://example.com/?p=2"
  date: "2024-05-05T08:00:00+00:00"
  excerpt: "Short"
  categories: [7]
  thumbnail:
    alt: Second image
    sizes:
      full: { url: "https://example.com/2.jpg" }
- id: 3
  title: Third
  permalink: "https://example.com/?p=3"
  date: "2024-05-04T08:00:00+00:00"
  content: "<p>Body <strong>only</strong></p>"
  categories: [7]
- id: 4
  title: "Fourth & <Final>"
  permalink: "https://example.com/?p=4"
  date: "2024-05-03T08:00:00+00:00"
  excerpt: "Ends \"here\""
- id: 5
  title: Fifth
  permalink: "https://example.com/?p=5"
  date: "2024-05-02T08:00:00+00:00"
  excerpt: "Later"
  thumbnail:
    alt: Fifth image
    sizes:
      medium_large: { url: "https://example.com/5.jpg" }
"#;

fn repository() -> MemoryRepository {
    MemoryRepository::from_yaml(POSTS).unwrap()
}

/// Wraps a repository and records every query it receives.
struct Recording<'a> {
    inner: &'a MemoryRepository,
    queries: RefCell<Vec<QuerySpec>>,
}

impl ContentRepository for Recording<'_> {
    fn query(&self, spec: &QuerySpec) -> Result<Vec<ContentItem>, RepositoryError> {
        self.queries.borrow_mut().push(spec.clone());
        self.inner.query(spec)
    }
}

fn article_ids(html: &str) -> Vec<u64> {
    html.match_indices("?p=")
        .filter(|(at, _)| html[..*at].ends_with("example.com/"))
        .filter_map(|(at, _)| {
            let rest = &html[at + 3..];
            let end = rest.find('"')?;
            rest[..end].parse().ok()
        })
        .fold(Vec::new(), |mut ids, id| {
            if ids.last() != Some(&id) {
                ids.push(id);
            }
            ids
        })
}

#[test]
fn later_grid_excludes_items_already_shown() {
    let store = MemoryStore::new();
    let repo = repository();
    let recording = Recording {
        inner: &repo,
        queries: RefCell::new(Vec::new()),
    };
    let mut page = PageRenderer::new(&store, &recording).unwrap();
    page.begin();

    let html = page
        .expand("[posts_grid count=\"3\"]\n[posts_grid count=\"3\"]")
        .unwrap();
    let (first, second) = html.split_once('\n').unwrap();

    assert_eq!(article_ids(first), vec![1, 2, 3]);
    assert_eq!(article_ids(second), vec![4, 5]);

    let queries = recording.queries.borrow();
    assert!(queries[0].ids_not_in.is_empty());
    assert_eq!(queries[1].ids_not_in, vec![1, 2, 3]);
    assert_eq!(page.tracker().all(), &[1, 2, 3, 4, 5]);
}

#[test]
fn duplicates_allowed_when_exclusion_disabled() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page
        .expand("[posts_grid count=\"2\"]\n[posts_grid count=\"2\" exclude_displayed=\"false\"]")
        .unwrap();
    let (first, second) = html.split_once('\n').unwrap();
    assert_eq!(article_ids(first), vec![1, 2]);
    assert_eq!(article_ids(second), vec![1, 2]);
    assert_eq!(page.tracker().all(), &[1, 2, 1, 2]);
}

#[test]
fn only_first_image_of_first_grid_is_eager() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page
        .expand("[posts_grid count=\"2\"][posts_grid count=\"3\"]")
        .unwrap();

    assert_eq!(html.matches("loading=\"eager\"").count(), 1);
    assert_eq!(html.matches("fetchpriority=\"high\"").count(), 1);
    assert!(html.contains(
        "alt=\"First image\" width=\"768\" height=\"512\" decoding=\"async\" fetchpriority=\"high\" loading=\"eager\""
    ));
    assert!(html.contains("alt=\"Second image\" decoding=\"async\" loading=\"lazy\""));
    assert!(html.contains("alt=\"Fifth image\" decoding=\"async\" loading=\"lazy\""));
    assert!(html.contains("id=\"posts-grid-1\""));
    assert!(html.contains("id=\"posts-grid-2\""));
}

#[test]
fn new_render_starts_fresh() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();

    page.begin();
    let first = page.expand("[posts_grid count=\"1\"]").unwrap();
    page.begin();
    let second = page.expand("[posts_grid count=\"1\"]").unwrap();

    assert_eq!(first, second);
    assert!(second.contains("loading=\"eager\""));
}

#[test]
fn excerpt_is_trimmed_to_requested_words() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page
        .expand("[posts_grid specific_posts=\"1\" excerpt_length=\"10\"]")
        .unwrap();
    assert!(html.contains(
        "<p class=\"posts-grid-excerpt\">one two three four five six seven eight nine ten\u{2026}</p>"
    ));
}

#[test]
fn body_is_used_when_excerpt_is_missing() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page.expand("[posts_grid specific_posts=\"3\"]").unwrap();
    assert!(html.contains("<p class=\"posts-grid-excerpt\">Body only</p>"));
}

#[test]
fn text_is_escaped() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page.expand("[posts_grid specific_posts=\"4\"]").unwrap();
    assert!(html.contains(">Fourth &amp; &lt;Final&gt;</a>"));
    assert!(html.contains(">Ends &quot;here&quot;</p>"));
    assert!(!html.contains("<Final>"));
}

#[test]
fn pinned_posts_keep_their_order() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page
        .expand("[posts_grid specific_posts=\"5,1,3\" offset=\"2\"]")
        .unwrap();
    assert_eq!(article_ids(&html), vec![5, 1, 3]);
}

#[test]
fn legacy_alias_renders_identically() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();

    page.begin();
    let current = page
        .expand("[posts_grid count=\"2\" include_cats=\"7\" layout=\"list\"]")
        .unwrap();
    page.begin();
    let legacy = page
        .expand("[inc_posts count=\"2\" include_cats=\"7\" layout=\"list\"]")
        .unwrap();

    assert_eq!(current, legacy);
    assert_eq!(article_ids(&current), vec![2, 3]);
}

#[test]
fn empty_grid_renders_marker_without_taking_an_instance() {
    let store = MemoryStore::new();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page
        .expand("[posts_grid include_cats=\"999\"]|[posts_grid count=\"1\"]")
        .unwrap();
    let (empty, grid) = html.split_once('|').unwrap();
    assert_eq!(empty, EMPTY_MARKER);
    assert!(grid.starts_with("<div id=\"posts-grid-1\""));
}

#[test]
fn settings_loaded_from_file_drive_defaults() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "posts_grid_default_columns: \"4\"").unwrap();
    writeln!(file, "posts_grid_default_show_date: false").unwrap();
    writeln!(file, "posts_grid_default_excerpt_length: 2").unwrap();

    let store = MemoryStore::from_path(file.path()).unwrap();
    let repo = repository();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page.expand("[posts_grid specific_posts=\"1\"]").unwrap();
    assert!(html.contains("posts-grid-cols-4"));
    assert!(!html.contains("<time"));
    assert!(html.contains(">one two\u{2026}</p>"));
}

#[test]
fn character_references_are_escaped_once() {
    let store = MemoryStore::new();
    let repo = MemoryRepository::from_yaml(
        r#"
- id: 9
  title: "Tom&#8217;s &amp; Jerry&#8217;s"
  permalink: "https://example.com/?p=9"
  date: "2024-05-06T08:00:00+00:00"
  content: "<p>Fish &amp; chips &hellip; caf&eacute; &lt;b&gt;</p>"
"#,
    )
    .unwrap();
    let mut page = PageRenderer::new(&store, &repo).unwrap();
    page.begin();

    let html = page.expand("[posts_grid]").unwrap();
    assert!(html.contains(
        "<p class=\"posts-grid-excerpt\">Fish &amp; chips \u{2026} caf\u{e9} &lt;b&gt;</p>"
    ));
    assert!(html.contains(">Tom\u{2019}s &amp; Jerry\u{2019}s</a>"));
    assert!(!html.contains("&amp;amp;"));
    assert!(!html.contains("&amp;hellip;"));
}
