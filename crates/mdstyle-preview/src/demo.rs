//! Built-in sample document.

/// Sample Markdown touching every styled node type.
pub const DEMO_MARKDOWN: &str = r"# Sample Markdown
This is a basic example of Markdown.
## Second Heading
 * Unordered list:
   - Item 1
   - Item 2
   - Item 3
 * More items
> This is a blockquote.
**Bold text**, *italic text*, and combined **bold and *italic*** text. ~~Strikethrough~~ text. [Link to example](https://example.com).
### Code Example:
```js
var foo = 'bar';
function baz(s) {
   return foo + ':' + s;
}
```
Inline code: `var foo = 'bar';`.
The end.";
