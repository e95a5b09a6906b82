//! Using url::Url as keys in a trie
use queryable_map::{QueryableMap, StringTrie};
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a new trie for URL keys and string values
    let mut url_trie = StringTrie::<Url, String>::new();

    let home = Url::parse("https://example.com/")?;
    let about = Url::parse("https://example.com/about")?;
    let contact = Url::parse("https://example.com/contact")?;
    let blog = Url::parse("https://example.com/blog")?;
    let blog_post = Url::parse("https://example.com/blog/first-post")?;
    let blog_draft = Url::parse("https://example.com/blog/zz-draft")?;

    url_trie.set(home.clone(), "Home page".to_string());
    url_trie.set(about.clone(), "About us".to_string());
    url_trie.set(contact.clone(), "Contact info".to_string());
    url_trie.set(blog.clone(), "Blog index".to_string());
    url_trie.set(blog_post.clone(), "First blog post".to_string());
    url_trie.set(blog_draft, "Unfinished".to_string());

    println!("Looking up URLs:");
    println!("  {} → {:?}", home, url_trie.get(&home));
    println!("  {} → {:?}", blog, url_trie.get(&blog));
    println!("  {} → {:?}", blog_post, url_trie.get(&blog_post));

    // Every page under the blog section
    let blog_view = url_trie.prefix_view(&blog);
    println!("\nBlog section pages ({}):", blog_view.len());
    for entry in blog_view.iter() {
        println!("  {} → {}", entry.key(), entry.value());
    }

    // URLs sort by their serialization, so ranges follow the site layout
    let before_blog = Url::parse("https://example.com/blog/")?;
    println!("\nPages up to the blog index, last first:");
    for entry in url_trie.less_than_desc(&before_blog) {
        println!("  {}", entry.key());
    }

    let unknown = Url::parse("https://example.com/unknown")?;
    println!("\nURL existence check:");
    println!("  {} exists: {}", home, url_trie.contains_key(&home));
    println!("  {} exists: {}", unknown, url_trie.contains_key(&unknown));

    url_trie.validate()?;
    Ok(())
}
