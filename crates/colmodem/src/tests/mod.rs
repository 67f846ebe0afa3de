mod arrays;
