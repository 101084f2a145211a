#[cfg(test)]
pub const HEXO_POST: &str = "---
title: Bits and Bytes - December 2022
date: 2022-12-30 10:15:00
updated: 1/2/2023
categories: Bits and Bytes
tags:
  - ai
  - serverless
excerpt: Things that caught my eye this month
hero: ./Bits-and-Bytes-2022-12/comments.png
comments: true
---
A few things I found interesting this month.

![comments](./Bits-and-Bytes-2022-12/comments.png)

<!-- more -->

## Serverless

![launch](./Bits-and-Bytes-2022-12/codelaunch.png)
";

#[cfg(test)]
pub const HEXO_POST_WITH_IMAGE: &str = "---
title: Foo
date: 11/5/2022
tags: solo
draft: true
---
Look at this:

![bar](./foo/bar.png)
";

#[cfg(test)]
pub const HEXO_POST_PLAIN: &str = "# No front-matter

Just a body.
";

#[cfg(test)]
pub const MALFORMED_POST: &str = "---
title: [unclosed
date: 2022-01-01
---
Body
";

#[cfg(test)]
pub const UNTERMINATED_POST: &str = "---
title: Never closed
date: 2022-01-01

Body without the closing delimiter
";
